//! Router assembly and shared state.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use intake_runtime::LlmEvaluator;

use crate::routes;
use crate::store::RequestStore;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RequestStore>,
    pub evaluator: Arc<LlmEvaluator>,
}

impl AppState {
    pub fn new(store: Arc<dyn RequestStore>, evaluator: Arc<LlmEvaluator>) -> Self {
        Self { store, evaluator }
    }
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
