//! # Auth controller
//!
//! Ties the pieces of the flow together around an injected [`SessionStore`] and
//! [`Navigator`]:
//!
//! 1. [`login`](AuthController::login) sends the browser to the hosted login page.
//! 2. The provider redirects back to `/auth/callback?code=..`;
//!    [`handle_callback`](AuthController::handle_callback) records the code.
//! 3. Recording a code is what triggers
//!    [`exchange_pending_code`](AuthController::exchange_pending_code). On success
//!    the tokens are stored, the session becomes authenticated (in that order)
//!    and the app route is pushed.
//!
//! Exchanges are never cancelled. Each one remembers the code generation it was
//! started for, and a result that arrives after a newer code was recorded is
//! dropped as [`ExchangeOutcome::Superseded`].

use crate::config::AuthConfig;
use crate::error::TokenExchangeError;
use crate::exchange::TokenExchangeClient;
use crate::redirect::{Navigator, RedirectController};
use crate::routes::APP_PATH;
use crate::store::SessionStore;
use crate::{callback, state::redact};

/// How an exchange attempt ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// No code was pending; nothing was sent.
    NoCode,
    /// Tokens stored and session authenticated.
    Authenticated,
    /// A newer code was recorded while this exchange was in flight.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct AuthController<S, N> {
    store: S,
    exchange: TokenExchangeClient,
    redirect: RedirectController<N>,
}

impl<S, N> AuthController<S, N>
where
    S: SessionStore,
    N: Navigator,
{
    pub fn new(config: AuthConfig, store: S, navigator: N) -> Result<Self, TokenExchangeError> {
        Ok(Self {
            exchange: TokenExchangeClient::new(config.clone())?,
            redirect: RedirectController::new(config, navigator),
            store,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn redirect(&self) -> &RedirectController<N> {
        &self.redirect
    }

    pub fn login(&self) {
        self.redirect.login();
    }

    /// Clear the session if it is authenticated.
    pub fn logout(&self) {
        self.store.logout();
    }

    /// Record the code found in `location`, if any.
    pub fn handle_callback(&self, location: &str) -> bool {
        callback::handle_callback(&self.store, location)
    }

    /// Exchange the pending authorization code, if there is one.
    pub async fn exchange_pending_code(&self) -> Result<ExchangeOutcome, TokenExchangeError> {
        let (code, generation) = match self.store.snapshot().pending_code() {
            Some((code, generation)) => (code.to_string(), generation),
            None => return Ok(ExchangeOutcome::NoCode),
        };

        let result = self.exchange.exchange(&code).await;

        if self.store.snapshot().code_generation != generation {
            tracing::warn!(
                code = %redact(&code),
                generation,
                succeeded = result.is_ok(),
                "Discarding token exchange result for a superseded code"
            );
            return Ok(ExchangeOutcome::Superseded);
        }

        match result {
            Ok(tokens) => {
                self.store.set_tokens(tokens.id_token, tokens.access_token, tokens.refresh_token);
                self.store.set_authenticated(true);
                tracing::info!("Session authenticated");
                self.redirect.navigator().push_route(APP_PATH);
                Ok(ExchangeOutcome::Authenticated)
            }
            Err(err) => {
                self.store.exchange_failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Record the callback code and exchange it right away.
    pub async fn complete_callback(
        &self,
        location: &str,
    ) -> Result<ExchangeOutcome, TokenExchangeError> {
        if !self.handle_callback(location) {
            return Ok(ExchangeOutcome::NoCode);
        }
        self.exchange_pending_code().await
    }
}
