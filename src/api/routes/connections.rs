use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::api::{error::ApiError, state::AppState};
use crate::application::TestOutcome;
use crate::domain::{Connection, NewConnection};

pub async fn list_connections(
    State(state): State<AppState>,
) -> Result<Json<Vec<Connection>>, ApiError> {
    state
        .connections
        .list()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch connections"))
}

pub async fn create_connection(
    State(state): State<AppState>,
    body: Result<Json<NewConnection>, JsonRejection>,
) -> Result<(StatusCode, Json<Connection>), ApiError> {
    let Json(descriptor) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let connection = state
        .connections
        .create(descriptor)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to create connection"))?;

    Ok((StatusCode::CREATED, Json(connection)))
}

pub async fn delete_connection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .connections
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to delete connection"))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn test_connection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TestOutcome>, ApiError> {
    state
        .connections
        .test(&id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain(e, "An error occurred while testing the connection"))
}
