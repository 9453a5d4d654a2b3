//! Hash-routed pages.
//!
//! Each page is a self-contained component: local signals for form and
//! fetch state, `spawn_local` for the async work, and the shared
//! [`AppContext`](crate::app::AppContext) for wallet and session state.

mod convert;
mod dashboard;
mod history;
mod login;
mod rewards;
mod send;

pub use convert::Convert;
pub use dashboard::Dashboard;
pub use history::History;
pub use login::Login;
pub use rewards::Rewards;
pub use send::Send;
