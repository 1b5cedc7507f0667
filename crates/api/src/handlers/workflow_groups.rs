//! Handlers for workflow group management.
//!
//! Every operation is scoped to the authenticated subject. A group that
//! exists but belongs to someone else produces the same `NOT_FOUND`
//! response as a group that does not exist at all.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use docgen_core::error::CoreError;
use docgen_core::types::DbId;
use docgen_core::workflow::{validate_group_name, validate_prompt_name, DEFAULT_GROUP_NAME};
use docgen_db::models::prompt::Prompt;
use docgen_db::models::workflow_group::{
    CreateWorkflowGroup, RenameWorkflowGroup, WorkflowGroupConfigUpdate,
};
use docgen_db::repositories::{PromptRepo, WorkflowConfigRepo, WorkflowGroupRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The uniform miss for nonexistent and foreign-owned groups alike.
fn group_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "WorkflowGroup",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /workflow/groups
// ---------------------------------------------------------------------------

/// List the caller's workflow groups.
pub async fn list_groups(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let groups = WorkflowGroupRepo::list_by_owner(&state.pool, &auth.subject).await?;
    tracing::debug!(count = groups.len(), "Listed workflow groups");
    Ok(Json(DataResponse { data: groups }))
}

// ---------------------------------------------------------------------------
// POST /workflow/groups
// ---------------------------------------------------------------------------

/// Create a new workflow group. Starts inactive; a missing name gets
/// the default.
pub async fn create_group(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWorkflowGroup>,
) -> AppResult<impl IntoResponse> {
    let name = match &input.name {
        Some(name) => {
            validate_group_name(name)?;
            name.as_str()
        }
        None => DEFAULT_GROUP_NAME,
    };

    let group = WorkflowGroupRepo::create(&state.pool, &auth.subject, name).await?;
    tracing::info!(group_id = %group.id, "Created workflow group");
    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

// ---------------------------------------------------------------------------
// PATCH /workflow/groups/{id}
// ---------------------------------------------------------------------------

/// Rename a group. Does not touch its active flag.
pub async fn rename_group(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RenameWorkflowGroup>,
) -> AppResult<impl IntoResponse> {
    validate_group_name(&input.name)?;

    let group = WorkflowGroupRepo::rename(&state.pool, id, &auth.subject, &input.name)
        .await?
        .ok_or_else(|| group_not_found(id))?;
    Ok(Json(DataResponse { data: group }))
}

// ---------------------------------------------------------------------------
// DELETE /workflow/groups/{id}
// ---------------------------------------------------------------------------

/// Delete a group together with its config and prompts.
pub async fn delete_group(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = WorkflowGroupRepo::delete(&state.pool, id, &auth.subject).await?;
    if !deleted {
        return Err(group_not_found(id));
    }
    tracing::info!(group_id = %id, "Deleted workflow group");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// POST /workflow/groups/{id}/activate
// ---------------------------------------------------------------------------

/// Make a group the caller's single active group.
///
/// All-or-nothing: a miss leaves every group exactly as it was.
pub async fn activate_group(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let group = WorkflowGroupRepo::activate(&state.pool, id, &auth.subject)
        .await?
        .ok_or_else(|| group_not_found(id))?;
    Ok(Json(DataResponse { data: group }))
}

// ---------------------------------------------------------------------------
// GET /workflow/groups/{id}/config
// ---------------------------------------------------------------------------

/// A group's config payload and prompts, including the reserved
/// base-instructions prompt when present.
#[derive(Debug, Serialize)]
pub struct GroupConfigResponse {
    pub config: Option<serde_json::Value>,
    pub prompts: Vec<Prompt>,
}

/// Fetch a group's config record and prompt set.
pub async fn get_group_config(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    WorkflowGroupRepo::find_for_owner(&state.pool, id, &auth.subject)
        .await?
        .ok_or_else(|| group_not_found(id))?;

    let config = WorkflowConfigRepo::find_by_group(&state.pool, id).await?;
    let prompts = PromptRepo::list_by_group(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: GroupConfigResponse {
            config: config.map(|c| c.config),
            prompts,
        },
    }))
}

// ---------------------------------------------------------------------------
// PATCH /workflow/groups/{id}/config
// ---------------------------------------------------------------------------

/// Apply a config update (config payload, prompt upserts, base
/// instructions) as one atomic unit.
///
/// Field presence, not truthiness, decides what is written: an absent
/// field performs no write, while an empty present value overwrites.
pub async fn update_group_config(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(update): Json<WorkflowGroupConfigUpdate>,
) -> AppResult<impl IntoResponse> {
    if let Some(prompts) = &update.prompts {
        for name in prompts.keys() {
            validate_prompt_name(name)?;
        }
    }

    if update.is_empty() {
        // Nothing to write; still a miss for a group the caller does
        // not own.
        WorkflowGroupRepo::find_for_owner(&state.pool, id, &auth.subject)
            .await?
            .ok_or_else(|| group_not_found(id))?;
    } else {
        let applied =
            WorkflowGroupRepo::apply_config_update(&state.pool, id, &auth.subject, &update)
                .await?;
        if !applied {
            return Err(group_not_found(id));
        }
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({ "status": "ok" }),
    }))
}
