//! Batch download handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use ytaudio_jobs::{BatchReceipt, BatchSnapshot};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for `POST /batch-download`.
#[derive(Debug, Deserialize)]
pub struct BatchDownloadRequest {
    #[serde(default, rename = "videoIds")]
    pub video_ids: Vec<String>,
}

/// `POST /batch-download`
///
/// Validates 1-20 IDs, enqueues one job per ID under a shared batch
/// namespace, and returns 202 immediately. Progress is readable from the
/// status endpoint.
pub async fn batch_download(
    State(state): State<AppState>,
    Json(body): Json<BatchDownloadRequest>,
) -> ApiResult<(StatusCode, Json<BatchReceipt>)> {
    let receipt = state.batches.submit(body.video_ids)?;
    Ok((StatusCode::ACCEPTED, Json(receipt)))
}

/// `GET /batch-download/{batch_id}`
///
/// Authoritative per-job status for a previously accepted batch.
pub async fn batch_status(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> ApiResult<Json<BatchSnapshot>> {
    state
        .batches
        .status(&batch_id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Unknown batch ID"))
}
