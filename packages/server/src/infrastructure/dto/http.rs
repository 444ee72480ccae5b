//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// One open connection, as listed by `GET /api/connections`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSummaryDto {
    pub connection_id: String,
    /// RFC 3339
    pub connected_at: String,
}
