//! Company and account directory the store is seeded from.
//!
//! The directory is fixed for the lifetime of a store. A built-in default covers local
//! runs; `--directory <file>` replaces it with a JSON document of the same shape:
//!
//! ```json
//! {
//!   "companies": [{ "id": "c1", "name": "Acme Holdings" }],
//!   "accounts": { "c1": [{ "id": "a1", "name": "Growth", "tickers": ["AAPL", "MSFT"] }] }
//! }
//! ```
use dashboard_common::model::{Account, Company};
use dashboard_common::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Companies in display order plus each company's accounts in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directory {
    /// Companies in display order.
    pub companies: Vec<Company>,
    /// Keyed by company id. Companies without an entry have no accounts.
    #[serde(default)]
    pub accounts: HashMap<String, Vec<Account>>,
}

impl Directory {
    /// Read and validate a directory from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let directory: Directory = serde_json::from_str(&text)?;
        directory.validate()?;
        Ok(directory)
    }

    /// Check ids are unique and every account belongs to a listed company.
    pub fn validate(&self) -> Result<()> {
        if self.companies.is_empty() {
            return Err(DashboardError::Config(String::from("directory has no companies")));
        }

        let mut company_ids = HashSet::new();
        for company in &self.companies {
            if company.id.is_empty() || !company_ids.insert(company.id.as_str()) {
                return Err(DashboardError::Config(format!(
                    "empty or duplicate company id: {:?}",
                    company.id
                )));
            }
        }

        let mut account_ids = HashSet::new();
        for (owner, accounts) in &self.accounts {
            if !company_ids.contains(owner.as_str()) {
                return Err(DashboardError::Config(format!(
                    "accounts listed for unknown company: {}",
                    owner
                )));
            }
            for account in accounts {
                if account.id.is_empty() || !account_ids.insert(account.id.as_str()) {
                    return Err(DashboardError::Config(format!(
                        "empty or duplicate account id: {:?}",
                        account.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Accounts of `company_id`, empty when the company is unknown or has none.
    pub fn accounts_of(&self, company_id: &str) -> &[Account] {
        self.accounts
            .get(company_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every account in company order, then account order.
    pub fn all_accounts(&self) -> impl Iterator<Item = &Account> {
        self.companies
            .iter()
            .flat_map(|company| self.accounts_of(&company.id))
    }
}

impl Default for Directory {
    fn default() -> Self {
        let company = |id: &str, name: &str| Company {
            id: id.to_string(),
            name: name.to_string(),
        };
        let account = |id: &str, name: &str, tickers: &[&str]| Account {
            id: id.to_string(),
            name: name.to_string(),
            tickers: tickers.iter().map(|t| t.to_string()).collect(),
        };

        let mut accounts = HashMap::new();
        accounts.insert(
            String::from("c1"),
            vec![
                account("a1", "Acme Growth", &["AAPL", "MSFT", "NVDA", "AMZN", "GOOGL"]),
                account("a2", "Acme Income", &["JNJ", "PG", "KO", "PEP", "MSFT"]),
            ],
        );
        accounts.insert(
            String::from("c2"),
            vec![account("a3", "Globex Tech", &["AAPL", "TSLA", "META", "NFLX", "AMD"])],
        );

        Self {
            companies: vec![company("c1", "Acme Holdings"), company("c2", "Globex Capital")],
            accounts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directory_is_valid() {
        let directory = Directory::default();
        directory.validate().unwrap();
        assert_eq!(directory.companies.len(), 2);
        assert_eq!(directory.all_accounts().count(), 3);
    }

    #[test]
    fn rejects_duplicate_account_ids() {
        let mut directory = Directory::default();
        let duplicate = directory.accounts["c1"][0].clone();
        directory.accounts.get_mut("c2").unwrap().push(duplicate);
        assert!(matches!(directory.validate(), Err(DashboardError::Config(_))));
    }

    #[test]
    fn rejects_accounts_for_unknown_company() {
        let mut directory = Directory::default();
        directory.accounts.insert(String::from("ghost"), Vec::new());
        assert!(directory.validate().is_err());
    }

    #[test]
    fn parses_json_without_accounts_section() {
        let directory: Directory =
            serde_json::from_str(r#"{"companies":[{"id":"solo","name":"Solo LLC"}]}"#).unwrap();
        directory.validate().unwrap();
        assert!(directory.accounts_of("solo").is_empty());
    }
}
