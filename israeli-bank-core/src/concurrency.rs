//! Per-bank serialization of collaborator calls

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};

use israeli_bank_provider::CompanyType;

use crate::error::CoreError;

/// How overlapping calls for the same bank are handled.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ConcurrencyPolicy {
    /// At most one collaborator call per bank at a time; other banks proceed.
    #[default]
    PerBank,
    /// No coordination at all.
    Parallel,
}

impl ConcurrencyPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PerBank => "per-bank",
            Self::Parallel => "parallel",
        }
    }
}

impl std::fmt::Display for ConcurrencyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConcurrencyPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-bank" => Ok(Self::PerBank),
            "parallel" => Ok(Self::Parallel),
            other => Err(CoreError::InvalidConcurrencyPolicy(other.to_string())),
        }
    }
}

/// One lock per known bank, fixed at construction.
pub struct BankLocks {
    locks: HashMap<CompanyType, Mutex<()>>,
}

impl BankLocks {
    pub fn new(policy: ConcurrencyPolicy, companies: impl IntoIterator<Item = CompanyType>) -> Self {
        let locks = match policy {
            ConcurrencyPolicy::PerBank => companies
                .into_iter()
                .map(|company| (company, Mutex::new(())))
                .collect(),
            ConcurrencyPolicy::Parallel => HashMap::new(),
        };
        Self { locks }
    }

    /// Wait for exclusive use of `company`.
    ///
    /// Returns `None` under [`ConcurrencyPolicy::Parallel`].
    pub async fn acquire(&self, company: CompanyType) -> Option<MutexGuard<'_, ()>> {
        let lock = self.locks.get(&company)?;
        if let Ok(guard) = lock.try_lock() {
            return Some(guard);
        }
        log::debug!("Waiting for in-flight {company} call to finish");
        Some(lock.lock().await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_names() {
        assert_eq!("per-bank".parse::<ConcurrencyPolicy>().unwrap(), ConcurrencyPolicy::PerBank);
        assert_eq!(" Parallel ".parse::<ConcurrencyPolicy>().unwrap(), ConcurrencyPolicy::Parallel);
        assert!("serial".parse::<ConcurrencyPolicy>().is_err());
    }

    #[tokio::test]
    async fn per_bank_lock_is_exclusive() {
        let locks = BankLocks::new(ConcurrencyPolicy::PerBank, [CompanyType::Leumi, CompanyType::Max]);

        let guard = locks.acquire(CompanyType::Leumi).await;
        assert!(guard.is_some());
        assert!(locks.locks[&CompanyType::Leumi].try_lock().is_err());
        assert!(locks.acquire(CompanyType::Max).await.is_some());

        drop(guard);
        assert!(locks.locks[&CompanyType::Leumi].try_lock().is_ok());
    }

    #[tokio::test]
    async fn parallel_policy_never_locks() {
        let locks = BankLocks::new(ConcurrencyPolicy::Parallel, CompanyType::ALL);
        assert!(locks.acquire(CompanyType::Leumi).await.is_none());
        assert!(locks.locks.is_empty());
    }
}
