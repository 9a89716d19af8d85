//! Utility modules.

/// Helpers that keep secrets and bulky output out of logs.
pub mod log_sanitizer;
