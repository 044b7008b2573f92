//! # intake-server
//!
//! HTTP API over `intake-core` and `intake-runtime`.
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /healthz` | liveness |
//! | `POST /submit` | validate and store a request |
//! | `POST /evaluate/rules` | rule-based evaluation |
//! | `POST /evaluate/ai` | model evaluation with rule fallback |
//! | `GET /requests` | all stored requests |
//! | `GET /requests/:id` | one stored request |

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod store;

pub use app::{build_router, AppState};
pub use config::{Args, Config};
pub use error::ApiError;
pub use store::{JsonFileStore, RequestStore, StoreError};
