use dioxus::prelude::*;

use crate::navigator::current_location;
use crate::provider::use_auth;

/// Callback view for `/auth/callback`: records the authorization code from
/// the URL and renders nothing. The exchange itself is run by the provider.
#[component]
pub fn AuthCallback() -> Element {
    let auth = use_auth();

    // Runs once after mount; the store only peeks, so nothing re-triggers it.
    use_effect(move || {
        if let Some(location) = current_location() {
            auth.controller.handle_callback(&location);
        }
    });

    rsx! {}
}
