//! # Authorization code exchange
//!
//! [`TokenExchangeClient`] turns the code handed back on `/auth/callback` into a
//! [`TokenSet`] by POSTing to the Cognito token endpoint:
//!
//! ```text
//! POST https://{domain}/oauth2/token
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=authorization_code&code=..&redirect_uri=..&client_id=..
//! ```
//!
//! The app client is public (no secret), so the client id travels in the form
//! body. Any 2xx answer carrying `id_token`, `access_token` and `refresh_token`
//! is a success; `token_type`, `expires_in` and other extras are ignored. A
//! non-2xx answer is read as an OAuth error body with `error` and/or
//! `error_description`.
//!
//! Codes and tokens never reach the log in plaintext.

use oauth2::{AccessToken, AuthorizationCode, ClientId, RedirectUrl, RefreshToken, TokenUrl};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::error::TokenExchangeError;
use crate::state::{redact, TokenSet};

/// Successful token endpoint body.
#[derive(Deserialize)]
struct TokenBody {
    id_token: String,
    access_token: AccessToken,
    refresh_token: RefreshToken,
}

impl From<TokenBody> for TokenSet {
    fn from(body: TokenBody) -> Self {
        TokenSet {
            id_token: body.id_token,
            access_token: body.access_token.secret().clone(),
            refresh_token: body.refresh_token.secret().clone(),
        }
    }
}

/// OAuth error body. Either field may be missing.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchanges authorization codes at the provider's token endpoint.
#[derive(Debug, Clone)]
pub struct TokenExchangeClient {
    config: AuthConfig,
    http_client: reqwest::Client,
}

impl TokenExchangeClient {
    pub fn new(config: AuthConfig) -> Result<Self, TokenExchangeError> {
        Ok(Self {
            config,
            http_client: http_client()?,
        })
    }

    fn endpoints(&self) -> Result<(TokenUrl, RedirectUrl), TokenExchangeError> {
        let token_url = TokenUrl::new(self.config.token_url())
            .map_err(|e| TokenExchangeError::Config(format!("token URL: {e}")))?;
        let redirect_url = RedirectUrl::new(self.config.redirect_uri())
            .map_err(|e| TokenExchangeError::Config(format!("redirect URI: {e}")))?;
        Ok((token_url, redirect_url))
    }

    /// Exchange `code` for the token triple.
    pub async fn exchange(&self, code: &str) -> Result<TokenSet, TokenExchangeError> {
        let (token_url, redirect_url) = self.endpoints()?;
        let client_id = ClientId::new(self.config.client_id.clone());
        let code = AuthorizationCode::new(code.to_string());

        tracing::debug!(
            grant_type = "authorization_code",
            client_id = %client_id.as_str(),
            code = %redact(code.secret()),
            redirect_uri = %redirect_url.as_str(),
            "Exchanging code for token"
        );

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code.secret().as_str()),
            ("redirect_uri", redirect_url.as_str()),
            ("client_id", client_id.as_str()),
        ];

        let result = self.request(&token_url, &params).await;
        if let Err(err) = &result {
            tracing::error!(error = %err, "Token exchange failed");
        }
        let tokens = result?;
        tracing::info!(tokens = ?tokens, "Tokens received");
        Ok(tokens)
    }

    async fn request(
        &self,
        token_url: &TokenUrl,
        params: &[(&str, &str)],
    ) -> Result<TokenSet, TokenExchangeError> {
        let response = self
            .http_client
            .post(token_url.url().as_str())
            .header(ACCEPT, "application/json")
            .form(params)
            .send()
            .await
            .map_err(|e| TokenExchangeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await;
            return Err(provider_error(status, body));
        }

        let body: TokenBody = response
            .json()
            .await
            .map_err(|e| TokenExchangeError::InvalidResponse(format!("HTTP {status}: {e}")))?;
        Ok(body.into())
    }
}

fn provider_error(status: StatusCode, body: reqwest::Result<ErrorBody>) -> TokenExchangeError {
    match body {
        Ok(ErrorBody {
            error: None,
            error_description: None,
        }) => TokenExchangeError::InvalidResponse(format!("HTTP {status} without an OAuth error")),
        Ok(body) => TokenExchangeError::Provider {
            error: body.error,
            description: body.error_description,
        },
        Err(e) => TokenExchangeError::InvalidResponse(format!("HTTP {status}: {e}")),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn http_client() -> Result<reqwest::Client, TokenExchangeError> {
    // Following redirects from the token endpoint would leak the code elsewhere.
    reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| TokenExchangeError::Transport(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn http_client() -> Result<reqwest::Client, TokenExchangeError> {
    Ok(reqwest::Client::new())
}
