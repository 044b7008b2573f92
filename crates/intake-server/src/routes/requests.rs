//! Submission and retrieval of stored requests.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use intake_core::{NetworkRequest, StoredRequest};

use crate::app::AppState;
use crate::error::{ApiError, AppJson};

/// Validate and persist a request without evaluating it.
pub(super) async fn submit(
    State(state): State<AppState>,
    AppJson(request): AppJson<NetworkRequest>,
) -> Result<Json<StoredRequest>, ApiError> {
    request.validate()?;

    let record = StoredRequest::new(Uuid::new_v4().to_string(), Utc::now(), request);
    state.store.append(record.clone()).await?;

    tracing::info!(id = %record.id, company = %record.request.company_name, "Request submitted");
    Ok(Json(record))
}

/// Every stored request in submission order.
pub(super) async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredRequest>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

pub(super) async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredRequest>, ApiError> {
    state
        .store
        .get(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
