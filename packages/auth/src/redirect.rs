//! Navigation seam and the redirect to the hosted login page.

use std::sync::{Arc, Mutex};

use crate::config::AuthConfig;

/// Where the auth flow sends the browser.
pub trait Navigator {
    /// Leave the application: full page load of `url`.
    fn replace_location(&self, url: &str);

    /// Client-side route change inside the application.
    fn push_route(&self, path: &str);
}

/// A navigation performed through a [`Navigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    External(String),
    Route(String),
}

/// Navigator that only records what it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    log: Arc<Mutex<Vec<Navigation>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigations(&self) -> Vec<Navigation> {
        self.log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    fn record(&self, navigation: Navigation) {
        if let Ok(mut log) = self.log.lock() {
            log.push(navigation);
        }
    }
}

impl Navigator for RecordingNavigator {
    fn replace_location(&self, url: &str) {
        self.record(Navigation::External(url.to_string()));
    }

    fn push_route(&self, path: &str) {
        self.record(Navigation::Route(path.to_string()));
    }
}

/// Sends the browser to the identity provider's login page.
#[derive(Debug, Clone)]
pub struct RedirectController<N> {
    config: AuthConfig,
    navigator: N,
}

impl<N: Navigator> RedirectController<N> {
    pub fn new(config: AuthConfig, navigator: N) -> Self {
        Self { config, navigator }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Navigate to the hosted login page. Nothing meaningful runs on this page afterwards.
    pub fn login(&self) {
        let url = self.config.login_url();
        tracing::info!(
            client_id = %self.config.client_id,
            redirect_uri = %self.config.redirect_uri(),
            "Redirecting to hosted login"
        );
        self.navigator.replace_location(&url);
    }
}
