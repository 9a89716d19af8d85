//! Bank catalog service
//!
//! Serves the supported-bank list (stateless over the registry)

use std::sync::Arc;

use crate::registry::BankRegistry;
use crate::types::BankList;

/// Bank catalog service
pub struct BankCatalogService {
    registry: Arc<BankRegistry>,
}

impl BankCatalogService {
    #[must_use]
    pub fn new(registry: Arc<BankRegistry>) -> Self {
        Self { registry }
    }

    /// Every known bank with its login fields. Never fails; an empty
    /// catalog gives an empty list.
    pub fn list_banks(&self) -> BankList {
        self.registry.bank_list()
    }
}
