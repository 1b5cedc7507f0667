//! Route definitions for document generation.
//!
//! Mounted directly under `/api/v1`:
//!
//! ```text
//! POST   /generate                    submit_document (multipart)
//! GET    /generate/{job_id}/status    job_status
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Generation routes — merged into the `/api/v1` tree.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generation::submit_document))
        .route("/generate/{job_id}/status", get(generation::job_status))
}
