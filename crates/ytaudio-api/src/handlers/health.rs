//! Liveness handler.

use axum::Json;
use serde::Serialize;

/// Liveness response.
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Root liveness probe.
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ytaudio backend is running".to_string(),
    })
}
