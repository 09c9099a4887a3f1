//! Axum application setup.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Dataset analysis
        .route("/analyze", post(handlers::analyze))
        .route("/data-profile", post(handlers::data_profile))
        .route("/insights", post(handlers::insights))
        // Row views
        .route("/process", post(handlers::process))
        .route("/clean", post(handlers::clean))
        // Charts
        .route("/chart-data", post(handlers::chart_data))
        .route(
            "/chart-recommendations",
            post(handlers::chart_recommendations),
        )
        // Models
        .route("/prediction-model", post(handlers::prediction_model))
        .route("/feature-importance", post(handlers::feature_importance))
        .route("/drift", post(handlers::drift))
        .fallback(handlers::not_found);

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(
    state: AppState,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;

    log::info!("server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            log::info!("shutting down");
        })
        .await?;

    Ok(())
}
