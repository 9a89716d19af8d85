//! Israeli Bank Core Library
//!
//! Adapter logic between tool calls and the scraping collaborator:
//! - Bank registry (`banks://list`)
//! - Transaction fetch service (`fetch-transactions`)
//! - Two-factor service (`two-factor-auth`)
//!
//! Every failure a service can produce is a [`ToolFailure`], which the
//! transport layer renders as an error-flagged `{ error, message }` payload.

pub mod concurrency;
pub mod error;
pub mod registry;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use concurrency::{BankLocks, ConcurrencyPolicy};
pub use error::{CoreError, CoreResult, ToolFailure};
pub use registry::BankRegistry;
pub use services::ServiceContext;
