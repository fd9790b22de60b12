//! # Auth crate: client-side OAuth2 authorization code flow for the KubeTalk console
//!
//! Everything the console needs to log a user in against the Cognito hosted login
//! domain, independent of any UI framework. The `ui` crate plugs a reactive store
//! and the browser's navigation into the traits defined here.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Client id, login domain and origin; derived login/token/redirect URLs |
//! | [`state`] | [`SessionState`] and its pure reducer over [`AuthAction`] |
//! | [`store`] | [`SessionStore`] trait (the named transitions) and [`MemorySessionStore`] |
//! | [`exchange`] | Code-for-token POST to `/oauth2/token` via the `oauth2` crate |
//! | [`redirect`] | [`Navigator`] seam and the redirect to the hosted login page |
//! | [`callback`] | Extracting `code` from the callback URL |
//! | [`guard`] | What protected views and the login page render, and when they navigate |
//! | [`controller`] | [`AuthController`], the flow from redirect to authenticated session |
//! | [`routes`] | The three application paths the flow relies on |

pub mod callback;
pub mod config;
pub mod controller;
pub mod error;
pub mod exchange;
pub mod guard;
pub mod redirect;
pub mod routes;
pub mod state;
pub mod store;

pub use config::AuthConfig;
pub use controller::{AuthController, ExchangeOutcome};
pub use error::TokenExchangeError;
pub use exchange::TokenExchangeClient;
pub use guard::{AccessGuard, GuardView, LoginGate};
pub use redirect::{Navigation, Navigator, RecordingNavigator, RedirectController};
pub use state::{AuthAction, SessionState, TokenSet};
pub use store::{MemorySessionStore, SessionStore};
