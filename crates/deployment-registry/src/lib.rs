//! Deployment Registry Service
//!
//! Keeps deployment definitions (image, replica count, ports, labels) in memory
//! and exposes create, read and delete over HTTP. Nothing survives a restart.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod storage;
pub mod validation;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiError;
pub use handlers::AppState;
pub use models::{Deployment, ErrorBody, Field, Port};
pub use storage::{DeleteOutcome, InsertOutcome, Storage};
pub use validation::{validate, ValidationError};

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/deployments", post(handlers::create_deployment_handler))
        .route(
            "/deployments/{id}",
            get(handlers::get_deployment_handler).delete(handlers::delete_deployment_handler),
        )
        .with_state(shared_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
