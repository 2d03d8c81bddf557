//! # server
//!
//! REST API server fitting ARIMA models to client-supplied series and
//! returning multi-step forecasts with backtest accuracy metrics.

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod routes;
pub mod series;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Name of the request-body field holding the observation series.
    pub series_field: String,
}

impl AppState {
    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            series_field: std::env::var("SERIES_FIELD").unwrap_or_else(|_| "value".to_string()),
        }
    }
}

/// Liveness probe - is the server running?
async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - smoke-fits a small model to verify the algorithm
/// crate is functional.
async fn readiness() -> Json<serde_json::Value> {
    use algorithm::{regression::Arima, Predictor};

    let mut model = Arima::new(1, 0, 0);
    let healthy = model.fit(&[1.0, 2.0, 3.0, 2.0, 3.0, 4.0]).is_ok();

    Json(serde_json::json!({
        "status": if healthy { "ready" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    // Cross-origin requests are allowed from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        // Legacy health endpoint
        .route("/health", get(liveness))
        // API endpoints
        .route("/predict", post(routes::predict))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
