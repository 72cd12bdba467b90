//! Wire types exchanged between the dashboard server and its viewers.
//!
//! Every type here serializes to the JSON shape the endpoints return. Field names are
//! camelCase on the wire (`updatedAt`), snake_case in Rust.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A company the signed-in user can pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Stable identifier used in request paths.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A brokerage account owned by exactly one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable identifier used in request paths.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Subscribed ticker symbols, in display order.
    pub tickers: Vec<String>,
}

/// Current simulated quote for one ticker, scoped to one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol (e.g., `AAPL`).
    pub ticker: String,
    /// Current price, never below 0.01.
    pub price: f64,
    /// Difference to the price before the last update, zero right after seeding.
    pub change: f64,
    /// Time of the last update.
    pub updated_at: DateTime<Utc>,
}

/// Body of `/accounts/{accountId}/data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountData {
    /// Quotes in the account's subscription order.
    pub stocks: Vec<Quote>,
}

/// Body returned alongside a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error text, `"not found"` for unrecognized paths.
    pub error: String,
}

impl ErrorBody {
    /// Body for paths that match no endpoint.
    pub fn not_found() -> Self {
        Self {
            error: String::from("not found"),
        }
    }

    /// Body for requests that failed inside the server.
    pub fn internal() -> Self {
        Self {
            error: String::from("internal error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn quote_uses_camel_case_timestamp_field() {
        let quote = Quote {
            ticker: "AAPL".into(),
            price: 101.25,
            change: -0.5,
            updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["ticker"], "AAPL");
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("updated_at").is_none());
    }

    #[test]
    fn not_found_body_matches_wire_shape() {
        let json = serde_json::to_string(&ErrorBody::not_found()).unwrap();
        assert_eq!(json, r#"{"error":"not found"}"#);
    }
}
