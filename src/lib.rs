pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod guard;
mod http;
pub mod middleware;
pub mod models;
pub mod report;
pub mod state;

use axum::{Router, middleware as axum_middleware};
use config::AppConfig;
use errors::AppError;
use middleware::{cors_layer, create_global_rate_limiter, rate_limit_middleware};
use state::AppState;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// The full application router with every layer applied.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();
    let global_rate_limiter = create_global_rate_limiter();

    Router::new()
        .merge(http::create_http_routes(state))
        .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.allowed_origins))
                .layer(TimeoutLayer::new(config.request_timeout)),
        )
}

pub async fn start_server() -> Result<(), AppError> {
    tracing_subscriber::fmt::init();
    let config = AppConfig::from_env()?;

    let postgres = db::connect(&config.database_url).await?;
    db::run_migrations(&postgres).await?;

    let port = config.port;
    let app = build_router(AppState::new(postgres, config));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("Lecturer assessment server running at http://0.0.0.0:{port}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
