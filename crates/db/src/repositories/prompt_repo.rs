//! Repository for the `prompts` table.
//!
//! Prompt writes go through `WorkflowGroupRepo::apply_config_update`
//! (transactional upserts); this repo covers reads.

use docgen_core::types::DbId;
use sqlx::PgPool;

use crate::models::prompt::Prompt;

/// Column list for prompts queries.
const COLUMNS: &str = "id, user_id, workflow_group_id, name, content, created_at, updated_at";

/// Read access to per-group prompts.
pub struct PromptRepo;

impl PromptRepo {
    /// List all prompts for a group, ordered by name.
    ///
    /// Includes the reserved `_base_instructions` prompt when present.
    pub async fn list_by_group(pool: &PgPool, group_id: DbId) -> Result<Vec<Prompt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompts
             WHERE workflow_group_id = $1
             ORDER BY name"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(group_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch one prompt by name within a group.
    pub async fn find_by_name(
        pool: &PgPool,
        group_id: DbId,
        name: &str,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompts
             WHERE workflow_group_id = $1 AND name = $2"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(group_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
