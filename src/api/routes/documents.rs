use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{error::ApiError, state::AppState};
use crate::domain::{Document, DocumentFilter};

/// Response header carrying the number of records left out by validation.
pub const DROPPED_HEADER: &str = "x-dropped-documents";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub connection_id: Option<String>,
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct UpdateDocumentResponse {
    pub success: bool,
    pub message: String,
}

/// Reads `connectionId` and the filter criteria from repeated query pairs.
/// Empty values count as absent. Type and status values are taken as given;
/// one that no document carries just narrows the listing to nothing.
pub fn parse_document_query(
    pairs: Vec<(String, String)>,
) -> Result<(String, DocumentFilter), ApiError> {
    let mut connection_id = None;
    let mut filter = DocumentFilter::new();

    for (key, value) in pairs {
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "connectionId" => connection_id = Some(value),
            "type" => filter.types.push(value),
            "status" => filter.statuses.push(value),
            "search" => filter.search = Some(value),
            "dateFrom" => filter.date_from = Some(value),
            "dateTo" => filter.date_to = Some(value),
            _ => {}
        }
    }

    let connection_id =
        connection_id.ok_or_else(|| ApiError::bad_request("connectionId is required"))?;
    Ok((connection_id, filter))
}

pub async fn list_documents(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<([(&'static str, String); 1], Json<Vec<Document>>), ApiError> {
    let (connection_id, filter) = parse_document_query(pairs)?;

    let listing = state
        .documents
        .list(&connection_id, &filter)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch documents"))?;

    Ok((
        [(DROPPED_HEADER, listing.dropped.to_string())],
        Json(listing.documents),
    ))
}

pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateDocumentRequest>, JsonRejection>,
) -> Result<Json<UpdateDocumentResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let connection_id = request
        .connection_id
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("connectionId is required"))?;
    let payload = request
        .payload
        .ok_or_else(|| ApiError::bad_request("payload is required"))?;

    state
        .documents
        .update_payload(&connection_id, &id, payload)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to update document"))?;

    Ok(Json(UpdateDocumentResponse {
        success: true,
        message: "Document updated successfully".to_string(),
    }))
}
