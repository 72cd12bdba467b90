//! Domain models for the dashboard server.
//!
//! - `clock` — injectable time source for quote timestamps.
//! - `directory` — fixed company/account directory, built-in or loaded from JSON.
//! - `store` — quote state and the random-walk step.
//! - `simulator` — background thread that ticks the store once per period.

pub mod clock;
pub mod directory;
pub mod simulator;
pub mod store;
