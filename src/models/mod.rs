//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`ConnectionState`] - wallet connection state machine record
//! - [`AuthState`] - API session mirror for the UI
//! - [`Route`] - hash-based navigation

mod auth;
mod route;
mod wallet;

pub use auth::AuthState;
pub use route::Route;
pub use wallet::{ConnectionState, normalize_account, normalize_chain_id};
