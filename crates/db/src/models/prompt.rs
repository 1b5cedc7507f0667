//! Prompt model.
//!
//! Prompts are named per group (`uq_prompts_group_name`). The reserved
//! name `_base_instructions` holds the group's base instructions and is
//! addressed through the same table.

use docgen_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A prompt row from the `prompts` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Prompt {
    pub id: DbId,
    pub user_id: String,
    pub workflow_group_id: DbId,
    pub name: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
