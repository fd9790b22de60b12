//! Login page view.

use std::cell::RefCell;
use std::rc::Rc;

use auth::LoginGate;
use dioxus::prelude::*;
use ui::{use_auth, LoginButton};

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let gate = use_hook(|| Rc::new(RefCell::new(LoginGate::new())));

    // If already logged in, go straight to the app
    let navigator = auth.controller.redirect().navigator().clone();
    let session = auth.state;
    use_effect(move || {
        let state = session.read().clone();
        gate.borrow_mut().evaluate(&state, &navigator);
    });

    rsx! {
        div {
            class: "login-container",
            style: "display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; padding: 2rem; background: #ffffff;",

            h1 {
                style: "margin-bottom: 2rem; color: #37352f; font-weight: 700; font-size: 1.75rem;",
                "Login"
            }

            LoginButton {
                label: "Login",
                class: "login-btn",
            }
        }

        style {
            r#"
            .login-btn {{
                padding: 0.625rem 1.25rem;
                border: none;
                border-radius: 4px;
                font-size: 0.9375rem;
                font-weight: 500;
                cursor: pointer;
                background-color: #24292e;
                color: white;
            }}

            .login-btn:hover {{
                opacity: 0.9;
            }}
            "#
        }
    }
}
