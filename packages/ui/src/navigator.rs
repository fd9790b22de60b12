//! Browser-backed implementation of the auth flow's [`auth::Navigator`].

use dioxus::prelude::*;
use dioxus::router::Navigator;

/// Performs full page loads through `window.location` and route changes
/// through the Dioxus router.
#[derive(Clone)]
pub struct BrowserNavigator {
    router: Navigator,
}

impl BrowserNavigator {
    pub fn new(router: Navigator) -> Self {
        Self { router }
    }
}

impl auth::Navigator for BrowserNavigator {
    fn replace_location(&self, url: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().replace(url) {
                    tracing::error!("Failed to navigate to {}: {:?}", url, e);
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!("Full page navigation to {} is only available in the browser", url);
        }
    }

    fn push_route(&self, path: &str) {
        self.router.push(path);
    }
}

/// The page URL the browser is currently showing.
pub fn current_location() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|window| window.location().href().ok())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Scheme, host and port the application is served from.
pub fn current_origin() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|window| window.location().origin().ok())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}
