//! Viewer session: who is signed in, what is selected, what is on screen.
//!
//! Selection rules:
//! - companies are fetched once, right after sign-in;
//! - picking a company fetches its accounts and auto-selects the first one;
//! - each successful poll replaces the quote table wholesale, a failed poll leaves the
//!   previous table on screen.
use crate::fetcher::DashboardApi;
use dashboard_common::model::{Account, Company, Quote};
use dashboard_common::{DashboardError, Result};
use log::info;

/// Signed-in state of the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Nothing is fetched while logged out.
    LoggedOut,
    /// Signed in under `user`.
    LoggedIn {
        /// Trimmed user name.
        user: String,
    },
}

/// Everything the dashboard view renders.
#[derive(Debug)]
pub struct Session {
    mode: Mode,
    companies: Vec<Company>,
    selected_company: Option<String>,
    accounts: Vec<Account>,
    selected_account: Option<String>,
    quotes: Vec<Quote>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            mode: Mode::LoggedOut,
            companies: Vec::new(),
            selected_company: None,
            accounts: Vec::new(),
            selected_account: None,
            quotes: Vec::new(),
        }
    }
}

impl Session {
    /// Sign in. Any non-empty name is accepted; there is no password check.
    pub fn login(&mut self, user: &str) -> Result<()> {
        let user = user.trim();
        if user.is_empty() {
            return Err(DashboardError::Login(String::from("user name must not be empty")));
        }
        info!("Signed in as {}", user);
        self.mode = Mode::LoggedIn {
            user: user.to_string(),
        };
        Ok(())
    }

    /// Sign out and forget every selection.
    pub fn logout(&mut self) {
        *self = Self::default();
    }

    /// Current mode.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Fetch the company list.
    pub fn load_companies(&mut self, api: &impl DashboardApi) -> Result<()> {
        self.require_login()?;
        self.companies = api.companies()?;
        info!("Loaded {} companies", self.companies.len());
        Ok(())
    }

    /// Switch to `company_id`, fetch its accounts and select the first one.
    pub fn select_company(&mut self, api: &impl DashboardApi, company_id: &str) -> Result<()> {
        self.require_login()?;
        let accounts = api.accounts(company_id)?;

        self.selected_company = Some(company_id.to_string());
        self.selected_account = accounts.first().map(|a| a.id.clone());
        self.accounts = accounts;
        self.quotes.clear();
        info!(
            "Company {} selected, {} accounts, watching {:?}",
            company_id,
            self.accounts.len(),
            self.selected_account
        );
        Ok(())
    }

    /// Watch `account_id` instead of the auto-selected account.
    pub fn select_account(&mut self, account_id: &str) {
        if self.selected_account.as_deref() != Some(account_id) {
            self.selected_account = Some(account_id.to_string());
            self.quotes.clear();
        }
    }

    /// Poll the selected account. On failure the previous quotes stay in place.
    ///
    /// Does nothing when no account is selected.
    pub fn refresh(&mut self, api: &impl DashboardApi) -> Result<()> {
        self.require_login()?;
        let Some(account_id) = &self.selected_account else {
            return Ok(());
        };
        let data = api.account_data(account_id)?;
        self.quotes = data.stocks;
        Ok(())
    }

    /// Companies as last fetched.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Accounts of the selected company.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Selected company id.
    pub fn selected_company(&self) -> Option<&str> {
        self.selected_company.as_deref()
    }

    /// Selected account id.
    pub fn selected_account(&self) -> Option<&str> {
        self.selected_account.as_deref()
    }

    /// Quote table currently on screen.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    fn require_login(&self) -> Result<()> {
        match self.mode {
            Mode::LoggedIn { .. } => Ok(()),
            Mode::LoggedOut => Err(DashboardError::Login(String::from("not signed in"))),
        }
    }
}
