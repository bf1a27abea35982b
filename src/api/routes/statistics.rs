use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::{error::ApiError, state::AppState};
use crate::domain::Statistics;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsQuery {
    pub connection_id: Option<String>,
}

pub async fn get_statistics(
    State(state): State<AppState>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<Statistics>, ApiError> {
    let connection_id = query
        .connection_id
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("connectionId is required"))?;

    state
        .statistics
        .summarize(&connection_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain(e, "Failed to fetch statistics"))
}
