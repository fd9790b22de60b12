//! # Access gating
//!
//! [`AccessGuard`] decides what a protected view shows and performs the login
//! redirect when the session is unauthenticated. The redirect is tied to
//! *entering* the unauthenticated state: evaluating the guard again while
//! nothing changed renders the placeholder without navigating a second time.
//!
//! [`LoginGate`] is the mirror image for the login page: an authenticated
//! visitor is sent on to the protected view, once.

use crate::redirect::{Navigator, RedirectController};
use crate::routes::APP_PATH;
use crate::state::SessionState;

/// What a guarded view should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView {
    /// Session is authenticated; show the wrapped content.
    Content,
    /// The browser is (being) sent to the hosted login page.
    Redirecting,
    /// The last exchange failed; show the message instead of looping through login.
    Failed(String),
}

/// Pure classification of a session for a protected view.
pub fn decide(state: &SessionState) -> GuardView {
    if state.is_authenticated {
        GuardView::Content
    } else if let Some(message) = &state.error {
        GuardView::Failed(message.clone())
    } else {
        GuardView::Redirecting
    }
}

/// Stateful guard for one mounted protected view.
#[derive(Debug, Default)]
pub struct AccessGuard {
    redirected: bool,
}

impl AccessGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `state`, redirecting to login on entry into [`GuardView::Redirecting`].
    pub fn evaluate<N: Navigator>(
        &mut self,
        state: &SessionState,
        redirect: &RedirectController<N>,
    ) -> GuardView {
        let view = decide(state);
        match view {
            GuardView::Redirecting if !self.redirected => {
                tracing::info!("Not authenticated, redirecting to login");
                self.redirected = true;
                redirect.login();
            }
            GuardView::Redirecting => {}
            GuardView::Content | GuardView::Failed(_) => self.redirected = false,
        }
        view
    }
}

/// Forwards an already authenticated visitor from the login page.
#[derive(Debug, Default)]
pub struct LoginGate {
    forwarded: bool,
}

impl LoginGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the visitor is authenticated (and has been sent to the app).
    pub fn evaluate<N: Navigator>(&mut self, state: &SessionState, navigator: &N) -> bool {
        if !state.is_authenticated {
            self.forwarded = false;
            return false;
        }
        if !self.forwarded {
            self.forwarded = true;
            navigator.push_route(APP_PATH);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::redirect::{Navigation, RecordingNavigator};
    use crate::state::{AuthAction, TokenSet};

    fn controller() -> (RedirectController<RecordingNavigator>, RecordingNavigator) {
        let navigator = RecordingNavigator::new();
        let config = AuthConfig::new("client-x", "auth.example.com", "https://app.example.com");
        (RedirectController::new(config, navigator.clone()), navigator)
    }

    fn authenticated() -> SessionState {
        let mut state = SessionState::default();
        state.apply(AuthAction::SetTokens(TokenSet::new("A", "B", "C")));
        state.apply(AuthAction::SetAuthenticated(true));
        state
    }

    #[test]
    fn test_unauthenticated_redirects_once_per_entry() {
        let (redirect, navigator) = controller();
        let mut guard = AccessGuard::new();
        let state = SessionState::default();

        assert_eq!(guard.evaluate(&state, &redirect), GuardView::Redirecting);
        assert_eq!(guard.evaluate(&state, &redirect), GuardView::Redirecting);

        let navigations = navigator.navigations();
        assert_eq!(navigations.len(), 1);
        let Navigation::External(url) = &navigations[0] else {
            panic!("expected a full page navigation, got {navigations:?}");
        };
        assert!(url.contains("client_id=client-x"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fauth%2Fcallback"));
    }

    #[test]
    fn test_authenticated_renders_content() {
        let (redirect, navigator) = controller();
        let mut guard = AccessGuard::new();

        assert_eq!(guard.evaluate(&authenticated(), &redirect), GuardView::Content);
        assert!(navigator.navigations().is_empty());
    }

    #[test]
    fn test_reentering_unauthenticated_redirects_again() {
        let (redirect, navigator) = controller();
        let mut guard = AccessGuard::new();

        guard.evaluate(&SessionState::default(), &redirect);
        guard.evaluate(&authenticated(), &redirect);
        guard.evaluate(&SessionState::default(), &redirect);

        assert_eq!(navigator.navigations().len(), 2);
    }

    #[test]
    fn test_failed_exchange_is_shown_not_looped() {
        let (redirect, navigator) = controller();
        let mut guard = AccessGuard::new();
        let mut state = SessionState::default();
        state.apply(AuthAction::SetAuthCode(Some("ABC".into())));
        state.apply(AuthAction::ExchangeFailed("Token exchange failed: bad code".into()));

        assert_eq!(
            guard.evaluate(&state, &redirect),
            GuardView::Failed("Token exchange failed: bad code".into())
        );
        assert!(navigator.navigations().is_empty());
    }

    #[test]
    fn test_login_gate_forwards_authenticated_visitor_once() {
        let navigator = RecordingNavigator::new();
        let mut gate = LoginGate::new();

        assert!(!gate.evaluate(&SessionState::default(), &navigator));
        assert!(navigator.navigations().is_empty());

        let state = authenticated();
        assert!(gate.evaluate(&state, &navigator));
        assert!(gate.evaluate(&state, &navigator));
        assert_eq!(
            navigator.navigations(),
            vec![Navigation::Route(APP_PATH.to_string())]
        );
    }
}
