//! Route definitions for workflow groups.
//!
//! Mounted at `/workflow/groups`:
//!
//! ```text
//! GET    /                  list_groups
//! POST   /                  create_group
//! PATCH  /{id}              rename_group
//! DELETE /{id}              delete_group
//! POST   /{id}/activate     activate_group
//! GET    /{id}/config       get_group_config
//! PATCH  /{id}/config       update_group_config
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::workflow_groups;
use crate::state::AppState;

/// Workflow group routes — mounted at `/workflow/groups`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(workflow_groups::list_groups).post(workflow_groups::create_group),
        )
        .route(
            "/{id}",
            axum::routing::patch(workflow_groups::rename_group)
                .delete(workflow_groups::delete_group),
        )
        .route("/{id}/activate", post(workflow_groups::activate_group))
        .route(
            "/{id}/config",
            get(workflow_groups::get_group_config)
                .patch(workflow_groups::update_group_config),
        )
}
