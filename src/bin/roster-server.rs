//! Rostering core, Axum server.
//!
//! Run with: cargo run --bin roster-server
//! Then POST a `SolverInput` to http://localhost:7860/solve

use tower_http::cors::{Any, CorsLayer};

use roster_core::api;
use roster_core::settings::Settings;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings = Settings::from_env();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router().layer(cors);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .expect("failed to bind listener");
    tracing::info!(addr = %settings.bind_addr, "roster-server listening");
    axum::serve(listener, app).await.expect("server error");
}
