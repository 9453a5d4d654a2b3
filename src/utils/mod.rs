//! Utility modules for DOM access, formatting and URLs.
//!
//! - [`dom`] - window, storage and clipboard helpers
//! - [`format`] - balance, address and timestamp formatting
//! - [`url`] - query-string parsing and explorer/referral links

pub mod dom;
pub mod format;
pub mod url;
