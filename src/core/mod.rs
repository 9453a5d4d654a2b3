//! Core logic behind the UI.
//!
//! This module provides:
//! - [`provider`] EIP-1193 access and event subscriptions
//! - [`wallet`] the connection state machine flows
//! - [`network`] target-chain reconciliation
//! - [`auth`] and [`webauthn`] sign-in/sign-up flows
//! - [`session`] persisted flags behind the store seam
//! - [`error`] per-boundary error types

pub mod auth;
pub mod error;
pub mod network;
pub mod provider;
pub mod session;
pub mod wallet;
pub mod webauthn;

#[cfg(any(test, feature = "mock"))]
pub mod mock;
