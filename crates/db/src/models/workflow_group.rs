//! Workflow group models and DTOs.
//!
//! Defines the database row struct for `workflow_groups` and the
//! create/rename/config-update types used by the API layer.

use std::collections::BTreeMap;

use docgen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A workflow group row from the `workflow_groups` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WorkflowGroup {
    pub id: DbId,
    pub user_id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// API request types
// ---------------------------------------------------------------------------

/// Request body for creating a group. A missing name gets the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateWorkflowGroup {
    pub name: Option<String>,
}

/// Request body for renaming a group.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameWorkflowGroup {
    pub name: String,
}

/// Request body for a config update against a group.
///
/// Every field is optional and applied independently: presence (not
/// truthiness) decides whether a write happens, so `Some("")` for
/// `base_instructions` overwrites with empty content while `None`
/// leaves the stored prompt untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowGroupConfigUpdate {
    /// Full replacement payload for the group's config record.
    pub config: Option<serde_json::Value>,
    /// Prompt upserts by name. Unlisted prompts are left as they are.
    pub prompts: Option<BTreeMap<String, String>>,
    /// Upsert of the reserved base-instructions prompt.
    pub base_instructions: Option<String>,
}

impl WorkflowGroupConfigUpdate {
    /// Whether this update carries any write at all.
    pub fn is_empty(&self) -> bool {
        self.config.is_none() && self.prompts.is_none() && self.base_instructions.is_none()
    }
}
