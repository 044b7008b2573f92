//! HTTP routes.

mod evaluate;
mod health;
mod requests;

use axum::routing::{get, post};
use axum::Router;

use crate::app::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/submit", post(requests::submit))
        .route("/requests", get(requests::list))
        .route("/requests/:id", get(requests::get_by_id))
        .route("/evaluate/rules", post(evaluate::rules))
        .route("/evaluate/ai", post(evaluate::ai))
}
