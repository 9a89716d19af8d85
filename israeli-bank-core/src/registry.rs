//! Immutable bank registry
//!
//! Built once at startup from a [`BankCatalog`] and shared read-only.

use std::collections::HashSet;

use israeli_bank_provider::{BankCatalog, BuiltinBankCatalog, CompanyType};

use crate::error::{CoreError, CoreResult};
use crate::types::{BankList, BankListEntry};

/// Known banks and their login fields.
#[derive(Debug, Clone)]
pub struct BankRegistry {
    entries: Vec<BankListEntry>,
    known: HashSet<CompanyType>,
}

impl BankRegistry {
    /// Build the registry from a catalog.
    ///
    /// Companies without metadata are still registered, named by their
    /// identifier and with no required credentials.
    pub fn from_catalog(catalog: &dyn BankCatalog) -> Self {
        let mut entries = Vec::new();
        let mut known = HashSet::new();

        for company in catalog.companies() {
            if !known.insert(company) {
                log::warn!("Bank catalog lists {company} more than once");
                continue;
            }

            let entry = match catalog.metadata(company) {
                Some(meta) => BankListEntry {
                    id: company,
                    name: meta.name,
                    required_credentials: meta.login_fields,
                },
                None => BankListEntry {
                    id: company,
                    name: company.to_string(),
                    required_credentials: Vec::new(),
                },
            };
            entries.push(entry);
        }

        log::debug!("Bank registry built with {} banks", entries.len());
        Self { entries, known }
    }

    /// Registry over the catalog compiled into the provider crate.
    pub fn builtin() -> Self {
        Self::from_catalog(&BuiltinBankCatalog)
    }

    /// Map a bank identifier to its company, rejecting unknown identifiers
    /// and companies this registry was not built with.
    pub fn resolve(&self, bank_id: &str) -> CoreResult<CompanyType> {
        let company = bank_id.parse::<CompanyType>()?;
        if self.known.contains(&company) {
            Ok(company)
        } else {
            Err(CoreError::InvalidBankId(bank_id.to_string()))
        }
    }

    pub fn entries(&self) -> &[BankListEntry] {
        &self.entries
    }

    pub fn companies(&self) -> impl Iterator<Item = CompanyType> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// The `banks://list` document.
    pub fn bank_list(&self) -> BankList {
        BankList {
            banks: self.entries.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::StaticCatalog;

    #[test]
    fn builtin_registry_knows_every_company() {
        let registry = BankRegistry::builtin();
        assert_eq!(registry.len(), CompanyType::ALL.len());
        for company in CompanyType::ALL {
            assert_eq!(registry.resolve(company.as_str()).unwrap(), company);
        }
    }

    #[test]
    fn unknown_id_is_rejected_with_message() {
        let registry = BankRegistry::builtin();
        let err = registry.resolve("INVALID_BANK").unwrap_err();
        assert_eq!(err.to_string(), "Invalid bank ID: INVALID_BANK");
        assert!(matches!(
            err,
            CoreError::Scraper(israeli_bank_provider::ScraperError::InvalidCompany(_))
        ));
    }

    #[test]
    fn ids_are_case_sensitive() {
        let registry = BankRegistry::builtin();
        assert_eq!(registry.resolve("visaCal").unwrap(), CompanyType::VisaCal);
        assert!(registry.resolve("visacal").is_err());
    }

    #[test]
    fn company_outside_catalog_is_rejected() {
        let catalog = StaticCatalog::new(vec![(CompanyType::Leumi, Some(vec!["password"]))]);
        let registry = BankRegistry::from_catalog(&catalog);

        let err = registry.resolve("max").unwrap_err();
        assert!(matches!(err, CoreError::InvalidBankId(_)));
        assert_eq!(err.to_string(), "Invalid bank ID: max");
    }

    #[test]
    fn missing_metadata_yields_empty_credentials() {
        let catalog = StaticCatalog::new(vec![
            (CompanyType::Leumi, Some(vec!["username", "password"])),
            (CompanyType::Pagi, None),
        ]);
        let registry = BankRegistry::from_catalog(&catalog);

        let entries = registry.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].required_credentials, vec!["username", "password"]);
        assert_eq!(entries[1].id, CompanyType::Pagi);
        assert_eq!(entries[1].name, "pagi");
        assert!(entries[1].required_credentials.is_empty());
    }

    #[test]
    fn empty_catalog_gives_empty_list() {
        let registry = BankRegistry::from_catalog(&StaticCatalog::new(Vec::new()));
        assert!(registry.is_empty());
        assert!(registry.bank_list().banks.is_empty());
        assert!(registry.resolve("leumi").is_err());
    }

    #[test]
    fn duplicate_catalog_entries_are_collapsed() {
        let catalog = StaticCatalog::new(vec![
            (CompanyType::Max, Some(vec!["username", "password"])),
            (CompanyType::Max, Some(vec!["id"])),
        ]);
        let registry = BankRegistry::from_catalog(&catalog);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.entries()[0].required_credentials,
            vec!["username", "password"]
        );
    }
}
