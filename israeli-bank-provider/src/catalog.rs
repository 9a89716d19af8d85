//! Bank catalog mirroring the scraping library's `SCRAPERS` table.
//!
//! This is a hand-maintained copy of `SCRAPERS` from `israeli-bank-scrapers`,
//! covering the 18 companies of its `CompanyTypes` enum up to and including
//! `pagi`. Update it together with the library version the bridge resolves.
//! A catalog read from the installed library at runtime can replace it
//! through [`BankCatalog`].

use crate::traits::BankCatalog;
use crate::types::{BankMetadata, CompanyType};

/// Display name and login fields for `company`, as declared by the library.
fn library_entry(company: CompanyType) -> (&'static str, &'static [&'static str]) {
    match company {
        CompanyType::Hapoalim => ("Bank Hapoalim", &["userCode", "password"]),
        CompanyType::Leumi => ("Bank Leumi", &["username", "password"]),
        CompanyType::Mizrahi => ("Mizrahi Bank", &["username", "password"]),
        CompanyType::Discount => ("Discount Bank", &["id", "password", "num"]),
        CompanyType::Mercantile => ("Mercantile Bank", &["id", "password", "num"]),
        CompanyType::OtsarHahayal => ("Bank Otsar Hahayal", &["username", "password"]),
        CompanyType::Max => ("Max", &["username", "password"]),
        CompanyType::VisaCal => ("Visa Cal", &["username", "password"]),
        CompanyType::Isracard => ("Isracard", &["id", "card6Digits", "password"]),
        CompanyType::Amex => ("Amex", &["id", "card6Digits", "password"]),
        CompanyType::Union => ("Union", &["username", "password"]),
        CompanyType::Beinleumi => ("Beinleumi", &["username", "password"]),
        CompanyType::Massad => ("Massad", &["username", "password"]),
        CompanyType::Yahav => ("Bank Yahav", &["username", "nationalID", "password"]),
        CompanyType::BeyahadBishvilha => ("Beyahad Bishvilha", &["id", "password"]),
        CompanyType::OneZero => (
            "One Zero",
            &[
                "email",
                "password",
                "otpCodeRetriever",
                "phoneNumber",
                "otpLongTermToken",
            ],
        ),
        CompanyType::Behatsdaa => ("Behatsdaa", &["id", "password"]),
        CompanyType::Pagi => ("Pagi", &["username", "password"]),
    }
}

/// Returns metadata for every company in [`CompanyType::ALL`].
pub fn get_all_bank_metadata() -> Vec<BankMetadata> {
    CompanyType::ALL.into_iter().map(bank_metadata).collect()
}

/// Returns metadata for a single company.
pub fn bank_metadata(company: CompanyType) -> BankMetadata {
    let (name, fields) = library_entry(company);
    BankMetadata {
        id: company,
        name: name.to_string(),
        login_fields: fields.iter().map(|f| (*f).to_string()).collect(),
    }
}

/// The catalog compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinBankCatalog;

impl BankCatalog for BuiltinBankCatalog {
    fn companies(&self) -> Vec<CompanyType> {
        CompanyType::ALL.to_vec()
    }

    fn metadata(&self, company: CompanyType) -> Option<BankMetadata> {
        Some(bank_metadata(company))
    }
}
