//! Repository for the `workflow_configs` table.
//!
//! Writes happen through `WorkflowGroupRepo::apply_config_update` so
//! they share a transaction with prompt upserts; this repo covers reads.

use docgen_core::types::DbId;
use sqlx::PgPool;

use crate::models::workflow_config::WorkflowConfig;

/// Column list for workflow_configs queries.
const COLUMNS: &str = "id, user_id, workflow_group_id, config, created_at, updated_at";

/// Read access to per-group workflow configs.
pub struct WorkflowConfigRepo;

impl WorkflowConfigRepo {
    /// Fetch the config record for a group, if one has been written yet.
    pub async fn find_by_group(
        pool: &PgPool,
        group_id: DbId,
    ) -> Result<Option<WorkflowConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workflow_configs
             WHERE workflow_group_id = $1"
        );
        sqlx::query_as::<_, WorkflowConfig>(&query)
            .bind(group_id)
            .fetch_optional(pool)
            .await
    }
}
