//! Identity provider configuration.
//!
//! The console talks to a Cognito managed login domain. Only two values are
//! needed from the environment (`COGNITO_CLIENT_ID`, `COGNITO_DOMAIN`); the
//! application origin is taken from the browser on wasm and from `APP_ORIGIN`
//! on native builds. Nothing here validates the values: a bad domain shows up
//! as a failed token request, not as a startup error.

use url::Url;

use crate::routes::CALLBACK_PATH;

/// Scopes requested on the hosted login page, already joined the way the
/// provider expects them in the query string.
pub const LOGIN_SCOPE: &str = "email openid profile";

const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// OAuth client configuration for the hosted login domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub client_id: String,
    pub cognito_domain: String,
    /// Scheme + host (+ port) the SPA is served from, without trailing slash.
    pub origin: String,
}

impl AuthConfig {
    pub fn new(
        client_id: impl Into<String>,
        cognito_domain: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        let origin: String = origin.into();
        Self {
            client_id: client_id.into(),
            cognito_domain: cognito_domain.into(),
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// Load from process environment variables (and `.env` if present).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from the variables captured when the wasm bundle was built.
    pub fn from_build_env(origin: impl Into<String>) -> Self {
        Self::new(
            option_env!("COGNITO_CLIENT_ID").unwrap_or_default(),
            option_env!("COGNITO_DOMAIN").unwrap_or_default(),
            origin,
        )
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let client_id = lookup("COGNITO_CLIENT_ID").unwrap_or_default();
        let cognito_domain = lookup("COGNITO_DOMAIN").unwrap_or_default();
        let origin = lookup("APP_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        Self::new(client_id, cognito_domain, origin)
    }

    /// The fixed callback URI registered with the provider.
    pub fn redirect_uri(&self) -> String {
        format!("{}{}", self.origin, CALLBACK_PATH)
    }

    /// Base URL of the identity provider.
    ///
    /// A domain that already carries a scheme is used verbatim, which lets a
    /// local emulator stand in for the hosted domain.
    pub fn provider_base(&self) -> String {
        let domain = self.cognito_domain.trim_end_matches('/');
        if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.provider_base())
    }

    /// Hosted login page URL with the authorization request parameters.
    ///
    /// Query values are form-encoded, so the scope becomes
    /// `email+openid+profile` and the redirect URI is fully escaped.
    pub fn login_url(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("scope", LOGIN_SCOPE)
            .append_pair("redirect_uri", &self.redirect_uri())
            .finish();
        format!("{}/login?{}", self.provider_base(), query)
    }

    /// Parsed form of [`login_url`](Self::login_url), if the domain makes it a valid URL.
    pub fn parsed_login_url(&self) -> Option<Url> {
        Url::parse(&self.login_url()).ok()
    }
}
