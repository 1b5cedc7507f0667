//! Workflow config model.
//!
//! One config record per group (enforced by `uq_workflow_configs_group`),
//! created lazily on the first config write and updated in place after.

use docgen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A workflow config row from the `workflow_configs` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub id: DbId,
    pub user_id: String,
    pub workflow_group_id: DbId,
    /// Opaque structured payload (ordered steps, settings).
    pub config: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
