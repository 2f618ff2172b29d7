//! # Contact Forwarding Proxy
//!
//! Stateless ingress for the portfolio contact form.
//!
//! The form-processing API wants a long-lived access key with every
//! submission. Shipping that key inside the client bundle would hand it to
//! anyone who reads the page source, so the client posts bare fields here
//! and this service attaches the key on the way through.
//!
//! # Request Lifecycle
//!
//! - Only `POST /contact` is served; other methods get a `405` with an
//!   `Allow: POST` header
//! - Body is parsed as JSON, then name/email/message are required
//! - The envelope (fields + key + source tag) goes upstream exactly once,
//!   no retries; the caller owns any retry policy
//! - Upstream's JSON body is passed back inside `{"ok": true, "res": ...}`
//!
//! A missing key fails the request with a generic `500`, never the process:
//! the handler answers every invocation, misconfigured or not.
//!
//! # Configuration
//!
//! - `PROXY_PORT`: listen port, defaults to 8787
//! - `UPSTREAM_URL`: form-processing endpoint override
//! - `WEB3FORMS_ACCESS_KEY`: the secret, from the environment or a mounted
//!   `/run/secrets` file
//! - `RUST_LOG`: tracing filter
use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::post,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod upstream;
pub mod utils;

use routes::{contact_handler, method_not_allowed};
use state::AppState;

/// Router construction is split out so tests can drive the service without
/// binding a socket.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/contact",
            post(contact_handler).fallback(method_not_allowed),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");
    let app = app(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
