pub mod generation;
pub mod health;
pub mod workflow_groups;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workflow/groups                    list, create
/// /workflow/groups/{id}               rename (PATCH), delete
/// /workflow/groups/{id}/activate      activate (POST)
/// /workflow/groups/{id}/config        get config, update config (PATCH)
///
/// /generate                           submit a document (POST, multipart)
/// /generate/{job_id}/status           poll job status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/workflow/groups", workflow_groups::router())
        .merge(generation::router())
}
