//! Kestrel Wallet: a client-side rendered wallet front-end.
//!
//! The library target exists so the native integration tests can drive
//! the connection flows against the mock seams; the binary just mounts
//! [`app::App`].

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod pages;
pub mod utils;
