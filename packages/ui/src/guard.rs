//! Route guard for views that require an authenticated session.

use std::cell::RefCell;
use std::rc::Rc;

use auth::{guard, AccessGuard, GuardView};
use dioxus::prelude::*;

use crate::provider::{use_auth, LoginButton};

/// Renders `children` only for an authenticated session.
///
/// An unauthenticated visitor is sent to the hosted login page once per
/// unauthenticated episode; a failed code exchange is shown with a retry
/// button instead of bouncing through the login page again.
#[component]
pub fn ProtectedRoute(children: Element) -> Element {
    let auth = use_auth();
    let access_guard = use_hook(|| Rc::new(RefCell::new(AccessGuard::new())));

    let redirect = auth.controller.redirect().clone();
    let session = auth.state;
    use_effect(move || {
        let state = session.read().clone();
        access_guard.borrow_mut().evaluate(&state, &redirect);
    });

    let view = match guard::decide(&auth.state.read()) {
        GuardView::Content => rsx! {
            {children}
        },
        GuardView::Redirecting => rsx! {
            div { class: "auth-redirecting", "Redirecting to login..." }
        },
        GuardView::Failed(message) => rsx! {
            div {
                class: "auth-error",
                style: "display: flex; flex-direction: column; align-items: center; gap: 1rem; padding: 2rem;",
                p { "{message}" }
                LoginButton { label: "Try again" }
            }
        },
    };
    view
}
