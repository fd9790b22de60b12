//! Errors raised by the code-for-token exchange.

use thiserror::Error;

/// Why a token exchange did not produce a token set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenExchangeError {
    /// The token endpoint answered with an OAuth error body carrying an
    /// `error` code, an `error_description`, or both.
    #[error("Token exchange failed: {}", provider_message(.error, .description))]
    Provider {
        error: Option<String>,
        description: Option<String>,
    },

    /// The request never got an HTTP response.
    #[error("Token exchange request failed: {0}")]
    Transport(String),

    /// The endpoint answered with something that is neither tokens nor an OAuth error.
    #[error("Unexpected token endpoint response: {0}")]
    InvalidResponse(String),

    /// The configured domain or origin does not form a valid URL.
    #[error("Invalid OAuth configuration: {0}")]
    Config(String),
}

impl TokenExchangeError {
    /// The provider's `error` code, when the failure came from the provider.
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            Self::Provider { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

fn provider_message<'a>(error: &'a Option<String>, description: &'a Option<String>) -> &'a str {
    description
        .as_deref()
        .or(error.as_deref())
        .unwrap_or("unknown provider error")
}
