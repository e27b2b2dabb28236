//! Repository for the `projects` table.

use arquimetal_core::numbering::NumberScope;
use arquimetal_core::project::ProjectDraft;
use arquimetal_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{Project, ProjectListParams, UpdateProject};
use crate::repositories::NumberRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, contact_id, name, project_number, proposal_number, \
    amount, purchase_order, url, effective_date, balance, pending_percentage, status, \
    created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project from a draft, assigning the next global project
    /// number in the same transaction.
    pub async fn create(pool: &PgPool, draft: &ProjectDraft) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let project_number = NumberRepo::next(&mut tx, NumberScope::Project).await?;

        let query = format!(
            "INSERT INTO projects
                (client_id, contact_id, name, project_number, proposal_number, amount,
                 purchase_order, url, effective_date, balance, pending_percentage, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(draft.client_id)
            .bind(draft.contact_id)
            .bind(draft.name.trim())
            .bind(project_number)
            .bind(draft.proposal_number)
            .bind(draft.amount)
            .bind(draft.purchase_order)
            .bind(&draft.url)
            .bind(draft.effective_date)
            .bind(draft.balance)
            .bind(draft.pending_percentage)
            .bind(draft.status)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects by descending project number, optionally filtered.
    pub async fn list(
        pool: &PgPool,
        params: &ProjectListParams,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::bigint IS NULL OR client_id = $1)
               AND ($2::text IS NULL OR status = $2)
             ORDER BY project_number DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(params.client_id)
            .bind(params.status)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied;
    /// `contact_id: null` clears the responsible contact. The project number
    /// is never changed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                client_id = COALESCE($2, client_id),
                contact_id = CASE WHEN $3 THEN $4 ELSE contact_id END,
                name = COALESCE($5, name),
                proposal_number = COALESCE($6, proposal_number),
                amount = COALESCE($7, amount),
                purchase_order = COALESCE($8, purchase_order),
                url = COALESCE($9, url),
                effective_date = COALESCE($10, effective_date),
                balance = COALESCE($11, balance),
                pending_percentage = COALESCE($12, pending_percentage),
                status = COALESCE($13, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.client_id)
            .bind(input.contact_id.is_some())
            .bind(input.contact_id.flatten())
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.proposal_number)
            .bind(input.amount)
            .bind(input.purchase_order)
            .bind(&input.url)
            .bind(input.effective_date)
            .bind(input.balance)
            .bind(input.pending_percentage)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project together with its invoices and invoice counter.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() > 0 {
            NumberRepo::clear_invoice_scope(&mut tx, id).await?;
        }

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
