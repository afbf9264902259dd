//! Single-video download handler.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use tracing::info;

use ytaudio_models::validate_video_id;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::stream::{artifact_body, WorkspaceLease};

/// `GET /download?videoId=<id>`
///
/// Runs the extraction job through the slot pool and streams the MP3 back.
/// The artifact and its workspace are reclaimed when the response body
/// finishes, whether the client reads it to the end or disconnects.
pub async fn download_audio(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Response> {
    let video_id = params
        .get("videoId")
        .ok_or_else(|| ApiError::bad_request("Missing videoId parameter"))?;
    let video_id = validate_video_id(video_id)
        .map_err(|_| ApiError::bad_request("Invalid videoId parameter"))?;

    info!(video_id = %video_id, "Received download request");

    let job = state.extraction_job();
    let output = state.pool.run(job.run(&video_id)).await?;
    let artifact = output.artifact;

    // From here on the lease owns cleanup; any exit path below drops it
    let lease = WorkspaceLease::new(
        artifact.path.clone(),
        output.workspace,
        state.registry.clone(),
    );

    let file = tokio::fs::File::open(&artifact.path)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to open artifact: {e}")))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .header(header::CONTENT_LENGTH, artifact.size_bytes.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.download_filename()),
        )
        .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .header(header::PRAGMA, "no-cache")
        .header(header::EXPIRES, "0")
        .body(artifact_body(file, lease))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {e}")))
}
