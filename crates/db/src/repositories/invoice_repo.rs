//! Repository for the `invoices` table.
//!
//! Every lookup is scoped to a project; an invoice id that exists under a
//! different project is treated as missing.

use arquimetal_core::invoice::{NEW_INVOICE_AMOUNT, NEW_INVOICE_OBSERVATIONS};
use arquimetal_core::numbering::NumberScope;
use arquimetal_core::types::DbId;
use sqlx::PgPool;

use crate::models::invoice::{Invoice, UpdateInvoice};
use crate::repositories::NumberRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, invoice_number, invoice_date, amount, accepted_at, \
    portal_uploads, collected_at, credit_note, debit_note, collection_reminders, \
    observations, created_at, updated_at";

/// Provides CRUD operations for invoices.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Append a blank invoice to a project with the next invoice number.
    ///
    /// New invoices have no date, a zero amount, zeroed counters and empty
    /// observations.
    pub async fn create_next(pool: &PgPool, project_id: DbId) -> Result<Invoice, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let invoice_number = NumberRepo::next(&mut tx, NumberScope::Invoice { project_id }).await?;

        let query = format!(
            "INSERT INTO invoices
                (project_id, invoice_number, amount, portal_uploads,
                 collection_reminders, observations)
             VALUES ($1, $2, $3, 0, 0, $4)
             RETURNING {COLUMNS}"
        );
        let invoice = sqlx::query_as::<_, Invoice>(&query)
            .bind(project_id)
            .bind(invoice_number)
            .bind(NEW_INVOICE_AMOUNT)
            .bind(NEW_INVOICE_OBSERVATIONS)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(invoice)
    }

    /// Find an invoice of `project_id`.
    pub async fn find_in_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List the invoices of a project ordered by invoice number.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices WHERE project_id = $1 ORDER BY invoice_number"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update an invoice of `project_id`. Only non-`None` fields in `input`
    /// are applied; sibling invoices and the project are left alone.
    ///
    /// Returns `None` if the invoice does not exist under that project.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateInvoice,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET
                invoice_date = COALESCE($3, invoice_date),
                amount = COALESCE($4, amount),
                accepted_at = COALESCE($5, accepted_at),
                portal_uploads = COALESCE($6, portal_uploads),
                collected_at = COALESCE($7, collected_at),
                credit_note = COALESCE($8, credit_note),
                debit_note = COALESCE($9, debit_note),
                collection_reminders = COALESCE($10, collection_reminders),
                observations = COALESCE($11, observations),
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.invoice_date)
            .bind(input.amount)
            .bind(input.accepted_at)
            .bind(input.portal_uploads)
            .bind(input.collected_at)
            .bind(input.credit_note)
            .bind(input.debit_note)
            .bind(input.collection_reminders)
            .bind(&input.observations)
            .fetch_optional(pool)
            .await
    }

    /// Delete an invoice of `project_id`. Its number is not reissued.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
