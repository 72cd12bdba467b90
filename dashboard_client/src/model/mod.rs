//! Viewer-side state.
//!
//! - `session` — sign-in mode, current selections and the displayed quote table.
pub mod session;
