//! API request handlers for the Deployment Registry

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::Deployment,
    storage::{DeleteOutcome, InsertOutcome, Storage},
    validation::validate,
};

/// Shared application state
#[derive(Debug, Default)]
pub struct AppState {
    pub storage: Storage,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

/// Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "deployment-registry",
        "deployments": state.storage.len().await
    }))
}

/// Validate and store a new deployment
pub async fn create_deployment_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Deployment>, JsonRejection>,
) -> Result<(StatusCode, Json<Deployment>), ApiError> {
    let Json(candidate) = payload.map_err(|rejection| {
        warn!("Rejected undecodable deployment body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    info!("Creating deployment: {}", candidate.id);

    if let Err(err) = validate(&candidate) {
        warn!("Deployment {} failed validation: {:?}", candidate.id, err);
        return Err(err.into());
    }

    let deployment = candidate.accepted();

    match state
        .storage
        .insert_if_absent(deployment.id, deployment.clone())
        .await
    {
        InsertOutcome::Inserted => Ok((StatusCode::CREATED, Json(deployment))),
        InsertOutcome::Conflict => {
            warn!("Deployment already exists: {}", deployment.id);
            Err(ApiError::Conflict)
        }
    }
}

/// Get deployment by id
pub async fn get_deployment_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Deployment>, ApiError> {
    info!("Getting deployment: {}", id);

    let id = parse_id(&id)?;

    state
        .storage
        .get(&id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Delete a deployment
pub async fn delete_deployment_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("Deleting deployment: {}", id);

    let id = parse_id(&id)?;

    match state.storage.delete(&id).await {
        DeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::NotFound => Err(ApiError::NotFound),
    }
}

/// Ids that are not UUIDs can never have been stored
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}
