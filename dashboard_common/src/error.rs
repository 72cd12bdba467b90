//! Error types shared between the dashboard server and the viewer.
//!
//! The `DashboardError` enum unifies the few ways things can go wrong around the
//! in-memory store: socket I/O, JSON encoding, HTTP client and framing, rejected configuration
//! and a poisoned store lock. The store and the simulator themselves are total and
//! never produce errors.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by server and viewer.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// I/O error originating from sockets or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Failure inside the HTTP client: connect, timeout, or body decoding.
    #[error("HTTP client error: {0}")]
    Request(#[from] reqwest::Error),

    /// Malformed HTTP request line, header block or status line.
    #[error("HTTP framing error: {0}")]
    Http(String),

    /// A response arrived with a non-success status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Configuration rejected before the store was built.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Sign-in attempted with an empty user name.
    #[error("Login rejected: {0}")]
    Login(String),

    /// Installing the Ctrl+C handler failed.
    #[error("Signal handler error: {0}")]
    Signal(String),

    /// A reader or the simulator panicked while holding the store lock.
    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<PoisonError<T>> for DashboardError {
    fn from(err: PoisonError<T>) -> Self {
        DashboardError::LockPoisoned(err.to_string())
    }
}
