//! Query interface over the store and the router that exposes it.
//!
//! [`QueryService`] answers the three lookups by reading live state under the read lock.
//! Unknown company or account ids yield empty lists, never errors. [`Router`] maps a
//! parsed [`Route`] to a JSON [`Response`] after the fixed simulated latency.
use crate::model::store::SharedStore;
use dashboard_common::http::{Method, RequestLine, StatusCode};
use dashboard_common::model::{Account, AccountData, Company, ErrorBody, Quote};
use dashboard_common::{Result, Route};
use log::error;
use serde::Serialize;
use std::thread;
use std::time::Duration;

/// Read-only view of the store.
#[derive(Clone)]
pub struct QueryService {
    store: SharedStore,
}

impl QueryService {
    /// Wrap a shared store.
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Companies in seed order.
    pub fn list_companies(&self) -> Result<Vec<Company>> {
        Ok(self.store.read()?.companies().to_vec())
    }

    /// Accounts of `company_id`; empty when the company is unknown or has none.
    pub fn list_accounts(&self, company_id: &str) -> Result<Vec<Account>> {
        Ok(self.store.read()?.accounts(company_id).to_vec())
    }

    /// Current quotes of `account_id` in subscription order; empty when unknown.
    pub fn get_account_quotes(&self, account_id: &str) -> Result<Vec<Quote>> {
        Ok(self.store.read()?.quotes(account_id).to_vec())
    }
}

/// Status plus encoded JSON body.
#[derive(Debug)]
pub struct Response {
    /// Status line to send.
    pub status: StatusCode,
    /// JSON-encoded body.
    pub body: Vec<u8>,
}

impl Response {
    fn json<T: Serialize>(status: StatusCode, body: &T) -> Result<Self> {
        Ok(Self {
            status,
            body: serde_json::to_vec(body)?,
        })
    }
}

/// Dispatches requests to the query service.
pub struct Router {
    queries: QueryService,
    latency: Duration,
}

impl Router {
    /// `latency` is applied before every response, including 404s.
    pub fn new(queries: QueryService, latency: Duration) -> Self {
        Self { queries, latency }
    }

    /// Answer one request. Internal failures become a 500 with a generic body.
    pub fn handle(&self, request: &RequestLine) -> Response {
        thread::sleep(self.latency);
        match self.dispatch(request) {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to answer {} {}: {}", request.method, request.target, e);
                Response {
                    status: StatusCode::InternalServerError,
                    body: serde_json::to_vec(&ErrorBody::internal()).unwrap_or_default(),
                }
            }
        }
    }

    fn dispatch(&self, request: &RequestLine) -> Result<Response> {
        if request.method != Method::Get {
            let body = ErrorBody {
                error: String::from("method not allowed"),
            };
            return Response::json(StatusCode::MethodNotAllowed, &body);
        }

        match Route::parse(&request.target) {
            Route::ListCompanies => Response::json(StatusCode::Ok, &self.queries.list_companies()?),
            Route::ListAccounts { company_id } => {
                Response::json(StatusCode::Ok, &self.queries.list_accounts(&company_id)?)
            }
            Route::GetAccountData { account_id } => {
                let stocks = self.queries.get_account_quotes(&account_id)?;
                Response::json(StatusCode::Ok, &AccountData { stocks })
            }
            Route::Unrecognized => Response::json(StatusCode::NotFound, &ErrorBody::not_found()),
        }
    }
}
