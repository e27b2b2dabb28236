//! Repository for the `number_counters` table.
//!
//! Every method takes a connection that is already inside a transaction, so
//! the number is only consumed if the insert that uses it commits.

use arquimetal_core::numbering::{next_number, NumberScope};
use arquimetal_core::types::DbId;
use sqlx::PgConnection;

/// Issues project and invoice numbers.
pub struct NumberRepo;

impl NumberRepo {
    /// Reserve the next number in `scope`.
    ///
    /// The counter row is seeded from the current maximum the first time a
    /// scope is used, then locked with `FOR UPDATE` so concurrent callers
    /// receive distinct numbers. Deleting the highest-numbered record never
    /// causes its number to be issued again.
    pub async fn next(conn: &mut PgConnection, scope: NumberScope) -> Result<i64, sqlx::Error> {
        let (name, scope_id) = scope.key();

        let seed = match scope {
            NumberScope::Project => "SELECT COALESCE(MAX(project_number), 0) FROM projects",
            NumberScope::Invoice { .. } => {
                "SELECT COALESCE(MAX(invoice_number), 0) FROM invoices WHERE project_id = $2"
            }
        };
        let seed_query = format!(
            "INSERT INTO number_counters (scope, scope_id, last_value)
             VALUES ($1, $2, ({seed}))
             ON CONFLICT (scope, scope_id) DO NOTHING"
        );
        sqlx::query(&seed_query)
            .bind(name)
            .bind(scope_id)
            .execute(&mut *conn)
            .await?;

        let last: i64 = sqlx::query_scalar(
            "SELECT last_value FROM number_counters
             WHERE scope = $1 AND scope_id = $2
             FOR UPDATE",
        )
        .bind(name)
        .bind(scope_id)
        .fetch_one(&mut *conn)
        .await?;

        let next = next_number(Some(last));
        sqlx::query(
            "UPDATE number_counters SET last_value = $3, updated_at = NOW()
             WHERE scope = $1 AND scope_id = $2",
        )
        .bind(name)
        .bind(scope_id)
        .bind(next)
        .execute(&mut *conn)
        .await?;

        Ok(next)
    }

    /// Drop the invoice counter of a deleted project.
    pub async fn clear_invoice_scope(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let (name, scope_id) = NumberScope::Invoice { project_id }.key();
        sqlx::query("DELETE FROM number_counters WHERE scope = $1 AND scope_id = $2")
            .bind(name)
            .bind(scope_id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
