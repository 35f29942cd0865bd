//! HTTP surface of the prediction service.

pub mod error;
pub mod handlers;

pub use error::AppError;
pub use handlers::SharedService;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(service: SharedService, cors_enabled: bool) -> Router {
    let router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/batch-predict", post(handlers::batch_predict))
        .layer(TraceLayer::new_for_http())
        .with_state(service);

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
