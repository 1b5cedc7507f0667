//! Repository for the `workflow_groups` table.
//!
//! All methods are scoped by `user_id`: a row that exists but belongs to
//! another owner is indistinguishable from a missing row (`Ok(None)` /
//! `Ok(false)`), so handlers cannot leak existence of foreign data.

use docgen_core::types::DbId;
use docgen_core::workflow::BASE_INSTRUCTIONS_PROMPT;
use sqlx::PgPool;

use crate::models::workflow_group::{WorkflowGroup, WorkflowGroupConfigUpdate};

/// Column list for workflow_groups queries.
const COLUMNS: &str = "id, user_id, name, is_active, created_at, updated_at";

/// Provides CRUD and activation operations for workflow groups.
pub struct WorkflowGroupRepo;

impl WorkflowGroupRepo {
    /// Insert a new group, returning the created row.
    ///
    /// New groups always start inactive.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        name: &str,
    ) -> Result<WorkflowGroup, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflow_groups (user_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowGroup>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// List all groups for an owner, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<WorkflowGroup>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workflow_groups
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, WorkflowGroup>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a group by id, scoped to an owner.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<WorkflowGroup>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workflow_groups
             WHERE id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, WorkflowGroup>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Rename a group, returning the updated row.
    ///
    /// Returns `None` when the group does not exist for this owner.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
        name: &str,
    ) -> Result<Option<WorkflowGroup>, sqlx::Error> {
        let query = format!(
            "UPDATE workflow_groups
             SET name = $1, updated_at = now()
             WHERE id = $2 AND user_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowGroup>(&query)
            .bind(name)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a group. Returns `true` if a row was deleted.
    ///
    /// The group's config and prompts go with it via `ON DELETE CASCADE`,
    /// so the whole removal is a single atomic statement.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workflow_groups WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Make a group the owner's single active group.
    ///
    /// Runs in a transaction: lock the owner's whole group set first (a
    /// miss rolls back before any write), deactivate whatever is
    /// currently active for the owner, then activate the target. The
    /// deactivate must come first or `uq_workflow_groups_active` rejects
    /// the flip. Locking the full set rather than just the target makes
    /// concurrent activates for the same owner serialize: the loser
    /// waits, re-reads the committed state, and wins in turn instead of
    /// failing on the unique index.
    ///
    /// Returns `None` when the group does not exist for this owner; in
    /// that case no group's state has changed.
    pub async fn activate(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<WorkflowGroup>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owned: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM workflow_groups
             WHERE user_id = $1
             FOR UPDATE",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if !owned.iter().any(|(owned_id,)| *owned_id == id) {
            // Dropping the transaction rolls back; nothing was written.
            return Ok(None);
        }

        sqlx::query(
            "UPDATE workflow_groups
             SET is_active = false, updated_at = now()
             WHERE user_id = $1 AND is_active AND id <> $2",
        )
        .bind(user_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE workflow_groups
             SET is_active = true, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let group = sqlx::query_as::<_, WorkflowGroup>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(group_id = %id, user_id, "Activated workflow group");
        Ok(Some(group))
    }

    /// Apply a config update (config payload, prompt upserts, base
    /// instructions) to a group as one transaction.
    ///
    /// Each field of `update` is applied only when present; a present
    /// empty value still writes. Returns `false` when the group does not
    /// exist for this owner, in which case nothing was written.
    pub async fn apply_config_update(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
        update: &WorkflowGroupConfigUpdate,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let target: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM workflow_groups
             WHERE id = $1 AND user_id = $2
             FOR UPDATE",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if target.is_none() {
            return Ok(false);
        }

        if let Some(config) = &update.config {
            sqlx::query(
                "INSERT INTO workflow_configs (user_id, workflow_group_id, config)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (workflow_group_id)
                 DO UPDATE SET config = EXCLUDED.config, updated_at = now()",
            )
            .bind(user_id)
            .bind(id)
            .bind(config)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(prompts) = &update.prompts {
            for (name, content) in prompts {
                upsert_prompt(&mut tx, user_id, id, name, content).await?;
            }
        }

        if let Some(base) = &update.base_instructions {
            upsert_prompt(&mut tx, user_id, id, BASE_INSTRUCTIONS_PROMPT, base).await?;
        }

        tx.commit().await?;

        tracing::debug!(group_id = %id, user_id, "Applied workflow config update");
        Ok(true)
    }
}

/// Insert or overwrite a named prompt within the open transaction.
async fn upsert_prompt(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: &str,
    group_id: DbId,
    name: &str,
    content: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO prompts (user_id, workflow_group_id, name, content)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (workflow_group_id, name)
         DO UPDATE SET content = EXCLUDED.content, updated_at = now()",
    )
    .bind(user_id)
    .bind(group_id)
    .bind(name)
    .bind(content)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
