//! Hash-based application routes.
//!
//! The URL hash is the source of truth for navigation; parsing is
//! total, with unknown paths falling back to the dashboard.

use crate::utils::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Login,
    Send,
    History,
    Rewards,
    Convert,
}

impl Route {
    /// Routes shown as navigation links, in display order.
    pub const NAV: [Self; 5] =
        [Self::Dashboard, Self::Send, Self::History, Self::Rewards, Self::Convert];

    /// Parse a URL hash without its `#` prefix.
    pub fn from_hash(hash: &str) -> Self {
        match hash.trim_start_matches('/').trim_end_matches('/') {
            "" => Self::Dashboard,
            "login" => Self::Login,
            "send" => Self::Send,
            "history" => Self::History,
            "rewards" => Self::Rewards,
            "convert" => Self::Convert,
            _ => Self::Dashboard,
        }
    }

    /// Hash fragment for this route, including the `#` prefix.
    pub fn to_hash(self) -> &'static str {
        match self {
            Self::Dashboard => "#/",
            Self::Login => "#/login",
            Self::Send => "#/send",
            Self::History => "#/history",
            Self::Rewards => "#/rewards",
            Self::Convert => "#/convert",
        }
    }

    /// Link label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Login => "Sign in",
            Self::Send => "Send",
            Self::History => "History",
            Self::Rewards => "Rewards",
            Self::Convert => "Convert",
        }
    }

    /// Route of the current browser URL.
    pub fn current() -> Self {
        Self::from_hash(&dom::get_hash())
    }

    /// Navigate to this route (adds to browser history).
    pub fn push(self) {
        dom::set_hash(self.to_hash());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hash_known_paths() {
        assert_eq!(Route::from_hash("/"), Route::Dashboard);
        assert_eq!(Route::from_hash(""), Route::Dashboard);
        assert_eq!(Route::from_hash("/login"), Route::Login);
        assert_eq!(Route::from_hash("/rewards/"), Route::Rewards);
        assert_eq!(Route::from_hash("convert"), Route::Convert);
    }

    #[test]
    fn test_from_hash_unknown_falls_back() {
        assert_eq!(Route::from_hash("/no/such/page"), Route::Dashboard);
    }

    #[test]
    fn test_hash_round_trip() {
        for route in [
            Route::Dashboard,
            Route::Login,
            Route::Send,
            Route::History,
            Route::Rewards,
            Route::Convert,
        ] {
            let hash = route.to_hash();
            assert_eq!(Route::from_hash(hash.trim_start_matches('#')), route);
        }
    }
}
