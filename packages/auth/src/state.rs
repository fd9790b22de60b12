//! # Session state and its reducer
//!
//! [`SessionState`] is the whole client-side view of the login session. It only
//! changes through [`AuthAction`]s applied by [`reduce`], a total function: every
//! action is accepted in every state, none of them fail.
//!
//! | Action | Effect |
//! |--------|--------|
//! | [`SetTokens`](AuthAction::SetTokens) | Replaces the token triple. |
//! | [`SetAuthCode`](AuthAction::SetAuthCode) | Records a code (bumping [`SessionState::code_generation`] and clearing any error) or clears it. |
//! | [`SetAuthenticated`](AuthAction::SetAuthenticated) | Sets the flag. `true` is ignored while no tokens are held. |
//! | [`ExchangeFailed`](AuthAction::ExchangeFailed) | Stores the failure message; auth fields untouched. |
//! | [`Clear`](AuthAction::Clear) | Back to the signed-out state. Only [`SessionState::code_generation`] survives. |
//!
//! The one invariant every sequence preserves: `is_authenticated` implies
//! `tokens.is_some()`.

use std::fmt;

/// Credentials returned by a successful code exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenSet {
    pub fn new(
        id_token: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            id_token: id_token.into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Tokens end up in log lines via `{:?}` far too easily.
impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("id_token", &redact(&self.id_token))
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .finish()
    }
}

/// Replacement text for a secret in diagnostics.
pub fn redact(secret: &str) -> String {
    format!("<redacted:{} chars>", secret.chars().count())
}

/// Authentication state of the running application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub tokens: Option<TokenSet>,
    /// Most recently received authorization code.
    pub auth_code: Option<String>,
    /// Message of the last failed exchange, for display.
    pub error: Option<String>,
    /// Number of codes recorded so far. An exchange result is only applied if
    /// no newer code arrived while it was in flight. Never reset, not even by
    /// [`AuthAction::Clear`].
    pub code_generation: u64,
}

impl SessionState {
    /// Apply an action in place.
    pub fn apply(&mut self, action: AuthAction) {
        *self = reduce(std::mem::take(self), action);
    }

    /// True when nothing but the code counter is set, as after a logout.
    pub fn is_cleared(&self) -> bool {
        !self.is_authenticated
            && self.tokens.is_none()
            && self.auth_code.is_none()
            && self.error.is_none()
    }

    /// The code waiting to be exchanged, with the generation it belongs to.
    pub fn pending_code(&self) -> Option<(&str, u64)> {
        self.auth_code
            .as_deref()
            .filter(|code| !code.is_empty())
            .map(|code| (code, self.code_generation))
    }
}

/// The transitions accepted by the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    SetTokens(TokenSet),
    SetAuthCode(Option<String>),
    SetAuthenticated(bool),
    ExchangeFailed(String),
    Clear,
}

/// Pure reducer over [`AuthAction`].
pub fn reduce(state: SessionState, action: AuthAction) -> SessionState {
    match action {
        AuthAction::SetTokens(tokens) => SessionState {
            tokens: Some(tokens),
            ..state
        },
        AuthAction::SetAuthCode(Some(code)) => SessionState {
            auth_code: Some(code),
            error: None,
            code_generation: state.code_generation.wrapping_add(1),
            ..state
        },
        AuthAction::SetAuthCode(None) => SessionState {
            auth_code: None,
            ..state
        },
        AuthAction::SetAuthenticated(true) if state.tokens.is_none() => state,
        AuthAction::SetAuthenticated(is_authenticated) => SessionState {
            is_authenticated,
            ..state
        },
        AuthAction::ExchangeFailed(message) => SessionState {
            error: Some(message),
            ..state
        },
        AuthAction::Clear => SessionState {
            code_generation: state.code_generation,
            ..SessionState::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens() -> TokenSet {
        TokenSet::new("A", "B", "C")
    }

    #[test]
    fn test_set_tokens_then_authenticate() {
        let mut state = SessionState::default();
        state.apply(AuthAction::SetTokens(tokens()));
        assert!(!state.is_authenticated);
        state.apply(AuthAction::SetAuthenticated(true));
        assert!(state.is_authenticated);
        assert_eq!(state.tokens, Some(tokens()));
    }

    #[test]
    fn test_authenticate_without_tokens_is_ignored() {
        let state = reduce(SessionState::default(), AuthAction::SetAuthenticated(true));
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_set_auth_code_bumps_generation_and_clears_error() {
        let mut state = SessionState::default();
        state.apply(AuthAction::ExchangeFailed("bad code".into()));
        state.apply(AuthAction::SetAuthCode(Some("ABC123".into())));
        assert_eq!(state.auth_code.as_deref(), Some("ABC123"));
        assert_eq!(state.code_generation, 1);
        assert!(state.error.is_none());

        // Same code again still counts as a new attempt.
        state.apply(AuthAction::SetAuthCode(Some("ABC123".into())));
        assert_eq!(state.code_generation, 2);
        assert_eq!(state.pending_code(), Some(("ABC123", 2)));

        state.apply(AuthAction::SetAuthCode(None));
        assert_eq!(state.pending_code(), None);
        assert_eq!(state.code_generation, 2);
    }

    #[test]
    fn test_empty_code_is_not_pending() {
        let state = reduce(SessionState::default(), AuthAction::SetAuthCode(Some(String::new())));
        assert_eq!(state.pending_code(), None);
    }

    #[test]
    fn test_exchange_failed_keeps_auth_fields() {
        let mut state = SessionState::default();
        state.apply(AuthAction::SetAuthCode(Some("code".into())));
        let before = state.clone();
        state.apply(AuthAction::ExchangeFailed("bad code".into()));
        assert_eq!(state.is_authenticated, before.is_authenticated);
        assert_eq!(state.tokens, before.tokens);
        assert_eq!(state.auth_code, before.auth_code);
        assert_eq!(state.error.as_deref(), Some("bad code"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut state = SessionState::default();
        state.apply(AuthAction::SetAuthCode(Some("code".into())));
        state.apply(AuthAction::SetTokens(tokens()));
        state.apply(AuthAction::SetAuthenticated(true));

        state.apply(AuthAction::Clear);
        assert!(state.is_cleared());
        let once = state.clone();
        state.apply(AuthAction::Clear);
        assert_eq!(state, once);
    }

    #[test]
    fn test_clear_keeps_code_generation() {
        let mut state = SessionState::default();
        state.apply(AuthAction::SetAuthCode(Some("first".into())));
        state.apply(AuthAction::Clear);
        assert_eq!(state.code_generation, 1);

        state.apply(AuthAction::SetAuthCode(Some("second".into())));
        assert_eq!(state.pending_code(), Some(("second", 2)));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let rendered = format!("{:?}", TokenSet::new("secret-id", "secret-access", "r"));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted:9 chars>"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn action_strategy() -> impl Strategy<Value = AuthAction> {
        prop_oneof![
            ("[a-z]{0,4}", "[a-z]{0,4}", "[a-z]{0,4}")
                .prop_map(|(i, a, r)| AuthAction::SetTokens(TokenSet::new(i, a, r))),
            prop::option::of("[A-Z0-9]{0,6}").prop_map(AuthAction::SetAuthCode),
            any::<bool>().prop_map(AuthAction::SetAuthenticated),
            "[a-z ]{0,10}".prop_map(AuthAction::ExchangeFailed),
            Just(AuthAction::Clear),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_authenticated_implies_tokens(actions in prop::collection::vec(action_strategy(), 0..40)) {
            let mut state = SessionState::default();
            for action in actions {
                state.apply(action);
                prop_assert!(!state.is_authenticated || state.tokens.is_some());
            }
        }

        #[test]
        fn prop_clear_always_yields_initial_state(actions in prop::collection::vec(action_strategy(), 0..40)) {
            let state = actions.into_iter().fold(SessionState::default(), reduce);
            let generation = state.code_generation;
            let cleared = reduce(state, AuthAction::Clear);
            prop_assert!(cleared.is_cleared());
            prop_assert_eq!(cleared.code_generation, generation);
            prop_assert_eq!(reduce(cleared.clone(), AuthAction::Clear), cleared);
        }

        #[test]
        fn prop_code_generation_never_decreases(actions in prop::collection::vec(action_strategy(), 0..40)) {
            let mut state = SessionState::default();
            for action in actions {
                let before = state.code_generation;
                state.apply(action);
                prop_assert!(state.code_generation >= before);
            }
        }
    }
}
