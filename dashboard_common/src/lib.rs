//!
//! Common types and utilities shared by the dashboard server and viewer.
//!
//! This crate aggregates:
//! - `error` — unified error type `DashboardError` used across the workspace.
//! - `result` — handy `Result<T, DashboardError>` alias.
//! - `model` — companies, accounts and quotes as they appear on the wire.
//! - `route` — parsed request paths for the three read endpoints.
//! - `http` — the small slice of HTTP/1.1 both sides speak.
//! - `net` — networking constants.
#![warn(missing_docs)]
pub mod error;
pub mod http;
pub mod model;
pub mod net;
pub mod result;
pub mod route;

pub use error::DashboardError;
pub use result::Result;
pub use route::Route;
