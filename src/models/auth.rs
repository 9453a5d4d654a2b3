//! API session state mirrored for the UI.

/// Whether a backend session exists and who it belongs to.
///
/// The token itself stays in storage; components only need presence and
/// a display name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub signed_in: bool,
    pub username: Option<String>,
}

impl AuthState {
    pub fn signed_in(username: Option<String>) -> Self {
        Self { signed_in: true, username }
    }

    /// Label for the account chip.
    pub fn display_name(&self) -> &str {
        if !self.signed_in {
            return "guest";
        }
        self.username.as_deref().unwrap_or("account")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_guest() {
        let state = AuthState::default();
        assert!(!state.signed_in);
        assert_eq!(state.display_name(), "guest");
    }

    #[test]
    fn test_signed_in_display_name() {
        assert_eq!(AuthState::signed_in(Some("rin".into())).display_name(), "rin");
        assert_eq!(AuthState::signed_in(None).display_name(), "account");
    }
}
