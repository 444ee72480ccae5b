//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::ConnectionSummaryDto, ui::state::AppState};
use ridelink_shared::time::timestamp_to_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Open connections, oldest first
pub async fn get_connections(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<ConnectionSummaryDto>> {
    let connections = state.list_connections_usecase.execute().await;

    // Domain Model から DTO への変換
    let summaries = connections
        .into_iter()
        .map(|c| ConnectionSummaryDto {
            connection_id: c.id.into_string(),
            connected_at: timestamp_to_rfc3339(c.connected_at.value()),
        })
        .collect();

    Json(summaries)
}
