//! Paths of the three views the auth flow moves between.

/// Login page; also where an unauthenticated visitor lands.
pub const LOGIN_PATH: &str = "/";

/// Redirect target registered with the identity provider.
pub const CALLBACK_PATH: &str = "/auth/callback";

/// Protected application view.
pub const APP_PATH: &str = "/app";
