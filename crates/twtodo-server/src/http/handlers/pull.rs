//! Pull handler.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{error, info, warn};

use twtodo_core::ListId;

use crate::http::responses::{ErrorResponse, PullRequest, PullResponse};
use crate::state::AppState;

/// Run one sync for the requested list.
pub async fn pull(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PullRequest>,
) -> impl IntoResponse {
    let list_id = ListId::new(request.list_id);
    if list_id.is_blank() {
        warn!("Rejected pull without list id");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "list_id must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let _guard = state.sync_lock.lock().await;
    info!(list_id = %list_id, "Pull requested");

    match state.reconciler.sync(&list_id).await {
        Ok(report) => Json(PullResponse {
            message: report.summary(),
            report,
        })
        .into_response(),
        Err(e) => {
            error!(list_id = %list_id, error = %e, "Pull failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
