//! UI components built with Leptos.
//!
//! - [`router`] - Hash-based routing (main entry point)
//! - [`navbar`] - Top navigation with the wallet connect control
//! - [`banner`] - Wrong-network warning strip

pub mod banner;
pub mod navbar;
pub mod router;

pub use router::AppRouter;
