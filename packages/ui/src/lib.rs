//! This crate contains the shared authentication UI for the console.

mod navigator;
pub use navigator::{current_location, current_origin, BrowserNavigator};

mod provider;
pub use provider::{use_auth, AuthContext, AuthProvider, LoginButton, LogoutButton, SignalStore};

mod guard;
pub use guard::ProtectedRoute;

mod callback;
pub use callback::AuthCallback;
