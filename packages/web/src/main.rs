use dioxus::prelude::*;

use auth::AuthConfig;
use ui::{AuthCallback, AuthProvider};
use views::{Login, Protected};

#[cfg(feature = "server")]
mod health;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AuthLayout)]
        #[route("/")]
        Login {},
        #[route("/auth/callback")]
        AuthCallback {},
        #[route("/app")]
        Protected {},
}

fn main() {
    #[cfg(feature = "server")]
    {
        let result = tokio::runtime::Runtime::new()
            .map_err(anyhow::Error::from)
            .and_then(|runtime| runtime.block_on(launch_server()));
        if let Err(e) = result {
            eprintln!("Server failed: {e:#}");
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> anyhow::Result<()> {
    use axum::routing::get;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    health::mark_startup();

    let router = axum::Router::new()
        .route("/health", get(health::health_check))
        // Then serve the Dioxus application
        .serve_dioxus_application(ServeConfig::new(), App);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        Router::<Route> {}
    }
}

/// Wraps every route in the auth provider, inside the router so the
/// provider can navigate after a successful login.
#[component]
fn AuthLayout() -> Element {
    let config = use_hook(auth_config);

    rsx! {
        AuthProvider { config,
            Outlet::<Route> {}
        }
    }
}

fn auth_config() -> AuthConfig {
    #[cfg(target_arch = "wasm32")]
    {
        AuthConfig::from_build_env(ui::current_origin().unwrap_or_default())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        AuthConfig::from_env()
    }
}
