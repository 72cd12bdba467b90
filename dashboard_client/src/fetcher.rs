//! Fetching dashboard data from the server over HTTP.
//!
//! [`DashboardApi`] is the seam between the viewer session and the network; [`HttpApi`]
//! implements it with a blocking `reqwest` client.
use dashboard_common::model::{Account, AccountData, Company};
use dashboard_common::{DashboardError, Result, Route};
use log::debug;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Timeout for a single request; generous next to the server's fixed latency.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The three lookups the viewer needs.
pub trait DashboardApi {
    /// All companies.
    fn companies(&self) -> Result<Vec<Company>>;
    /// Accounts of a company.
    fn accounts(&self, company_id: &str) -> Result<Vec<Account>>;
    /// Current quotes of an account.
    fn account_data(&self, account_id: &str) -> Result<AccountData>;
}

/// HTTP implementation of [`DashboardApi`].
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Client for the server at `server`, either `host:port` or a full `http://` URL.
    pub fn new(server: &str) -> Result<Self> {
        let server = server.trim().trim_end_matches('/');
        let base_url = if server.starts_with("http://") || server.starts_with("https://") {
            server.to_string()
        } else {
            format!("http://{}", server)
        };
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    fn get<T: DeserializeOwned>(&self, route: &Route) -> Result<T> {
        let path = route
            .path()
            .ok_or_else(|| DashboardError::Http(String::from("route has no path")))?;
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send()?;
        if let Err(e) = response.error_for_status_ref().map(|_| ()) {
            let status = e.status().map(|s| s.as_u16()).unwrap_or_default();
            let body = response.text().unwrap_or_default();
            return Err(DashboardError::Status { status, body });
        }
        Ok(response.json::<T>()?)
    }
}

impl DashboardApi for HttpApi {
    fn companies(&self) -> Result<Vec<Company>> {
        self.get(&Route::ListCompanies)
    }

    fn accounts(&self, company_id: &str) -> Result<Vec<Account>> {
        self.get(&Route::ListAccounts {
            company_id: company_id.to_string(),
        })
    }

    fn account_data(&self, account_id: &str) -> Result<AccountData> {
        self.get(&Route::GetAccountData {
            account_id: account_id.to_string(),
        })
    }
}
