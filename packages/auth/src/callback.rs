//! Capture of the authorization code on `/auth/callback`.

use crate::state::redact;
use crate::store::SessionStore;

/// The `code` query parameter of `location`, if present and non-empty.
///
/// `location` may be a full URL, a path with a query, or a bare query string
/// (with or without the leading `?`).
pub fn code_from_location(location: &str) -> Option<String> {
    let without_fragment = location.split('#').next().unwrap_or_default();
    let query = match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if without_fragment.contains('=') => without_fragment,
        None => return None,
    };

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|code| !code.is_empty())
}

/// Feed the code found in `location` to the store.
///
/// Returns whether a code was recorded. Without a code nothing is dispatched.
pub fn handle_callback<S: SessionStore + ?Sized>(store: &S, location: &str) -> bool {
    match code_from_location(location) {
        Some(code) => {
            tracing::info!(code = %redact(&code), "Authorization code received");
            store.set_auth_code(Some(code));
            true
        }
        None => {
            tracing::debug!("Callback reached without an authorization code");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionState;
    use crate::store::MemorySessionStore;

    #[test]
    fn test_code_from_location() {
        assert_eq!(
            code_from_location("https://app.example.com/auth/callback?code=ABC123").as_deref(),
            Some("ABC123")
        );
        assert_eq!(
            code_from_location("/auth/callback?state=x&code=a%2Bb#top").as_deref(),
            Some("a+b")
        );
        assert_eq!(code_from_location("?code=XYZ").as_deref(), Some("XYZ"));
        assert_eq!(code_from_location("code=XYZ").as_deref(), Some("XYZ"));
    }

    #[test]
    fn test_missing_or_empty_code() {
        assert_eq!(code_from_location("/auth/callback"), None);
        assert_eq!(code_from_location("/auth/callback?code="), None);
        assert_eq!(code_from_location("/auth/callback?error=access_denied"), None);
        assert_eq!(code_from_location("/auth/callback#code=ABC"), None);
    }

    #[test]
    fn test_callback_without_code_touches_nothing() {
        let store = MemorySessionStore::new();
        assert!(!handle_callback(&store, "https://app.example.com/auth/callback"));
        assert_eq!(store.dispatch_count(), 0);
        assert_eq!(store.snapshot(), SessionState::default());
    }

    #[test]
    fn test_callback_records_code() {
        let store = MemorySessionStore::new();
        assert!(handle_callback(&store, "/auth/callback?code=ABC123"));
        let state = store.snapshot();
        assert_eq!(state.auth_code.as_deref(), Some("ABC123"));
        assert_eq!(state.code_generation, 1);
        assert!(!state.is_authenticated);
    }
}
