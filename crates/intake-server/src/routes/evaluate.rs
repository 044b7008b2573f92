//! Stateless evaluation endpoints. Nothing here touches the store.

use axum::extract::State;
use axum::Json;

use intake_core::{EvaluationResult, NetworkRequest};

use crate::app::AppState;
use crate::error::{ApiError, AppJson};

/// Score with the deterministic rule engine.
pub(super) async fn rules(
    AppJson(request): AppJson<NetworkRequest>,
) -> Result<Json<EvaluationResult>, ApiError> {
    request.validate()?;
    Ok(Json(intake_core::evaluate(&request)))
}

/// Score with the model, falling back to the rule engine.
pub(super) async fn ai(
    State(state): State<AppState>,
    AppJson(request): AppJson<NetworkRequest>,
) -> Result<Json<EvaluationResult>, ApiError> {
    request.validate()?;
    Ok(Json(state.evaluator.evaluate(&request).await))
}
