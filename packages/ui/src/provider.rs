//! Authentication context and hooks for the UI.

use auth::routes::LOGIN_PATH;
use auth::Navigator as _;
use auth::{AuthAction, AuthConfig, AuthController, SessionState, SessionStore};
use dioxus::prelude::*;

use crate::navigator::BrowserNavigator;

/// Session store backed by a Dioxus signal, so every transition re-renders
/// the components that read the state.
#[derive(Clone, Copy)]
pub struct SignalStore(Signal<SessionState>);

impl SessionStore for SignalStore {
    fn snapshot(&self) -> SessionState {
        self.0.peek().clone()
    }

    fn dispatch(&self, action: AuthAction) {
        let mut state = self.0;
        state.write().apply(action);
    }
}

pub type UiAuthController = AuthController<SignalStore, BrowserNavigator>;

/// What [`use_auth`] hands out.
#[derive(Clone)]
pub struct AuthContext {
    /// Reactive session state; reading it subscribes the component.
    pub state: Signal<SessionState>,
    pub controller: UiAuthController,
}

/// Get the authentication context provided by [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Provider component that owns the session and runs the code exchange.
///
/// Must be rendered inside the router: successful logins navigate to the app route.
#[component]
pub fn AuthProvider(config: AuthConfig, children: Element) -> Element {
    let state = use_signal(SessionState::default);
    let router = use_navigator();

    let controller = use_hook(move || {
        AuthController::new(config, SignalStore(state), BrowserNavigator::new(router))
    });

    let controller = match controller {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!("Failed to set up authentication: {}", e);
            return rsx! {
                div { class: "auth-error", "Authentication is unavailable: {e}" }
            };
        }
    };

    // Changes only when a new code is recorded, not on every state change.
    let pending = use_memo(move || {
        state
            .read()
            .pending_code()
            .map(|(_, generation)| generation)
    });

    let exchange = controller.clone();
    use_effect(move || {
        if pending().is_none() {
            return;
        }
        let controller = exchange.clone();
        spawn(async move {
            if let Err(e) = controller.exchange_pending_code().await {
                tracing::debug!("Code exchange ended with an error: {}", e);
            }
        });
    });

    use_context_provider(|| AuthContext { state, controller });

    rsx! {
        {children}
    }
}

/// Button that sends the browser to the hosted login page.
#[component]
pub fn LoginButton(
    #[props(default = "Login".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth = use_auth();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| auth.controller.login(),
            "{label}"
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let auth = use_auth();

    let onclick = move |_| {
        auth.controller.logout();
        auth.controller.redirect().navigator().push_route(LOGIN_PATH);
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
