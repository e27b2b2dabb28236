//! Repository for the `labels` and `client_labels` tables.

use std::collections::HashMap;

use arquimetal_core::types::DbId;
use sqlx::{FromRow, PgConnection, PgPool};

use crate::models::label::{normalize_label_names, Label};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "l.id, l.name, l.created_at";

#[derive(FromRow)]
struct ClientLabelRow {
    client_id: DbId,
    #[sqlx(flatten)]
    label: Label,
}

/// Provides label lookups and the client-label link management.
pub struct LabelRepo;

impl LabelRepo {
    /// Replace the label set of a client with `names`, creating unknown
    /// labels on the fly. Returns the resulting labels ordered by name.
    pub async fn replace_for_client(
        conn: &mut PgConnection,
        client_id: DbId,
        names: &[String],
    ) -> Result<Vec<Label>, sqlx::Error> {
        let names = normalize_label_names(names);

        sqlx::query("DELETE FROM client_labels WHERE client_id = $1")
            .bind(client_id)
            .execute(&mut *conn)
            .await?;

        if names.is_empty() {
            return Ok(Vec::new());
        }

        // DO UPDATE (not DO NOTHING) so existing labels are returned too.
        let mut labels = sqlx::query_as::<_, Label>(
            "INSERT INTO labels (name)
             SELECT UNNEST($1::text[])
             ON CONFLICT ON CONSTRAINT uq_labels_name DO UPDATE SET name = EXCLUDED.name
             RETURNING id, name, created_at",
        )
        .bind(&names)
        .fetch_all(&mut *conn)
        .await?;

        let label_ids: Vec<DbId> = labels.iter().map(|l| l.id).collect();
        sqlx::query(
            "INSERT INTO client_labels (client_id, label_id)
             SELECT $1, UNNEST($2::bigint[])
             ON CONFLICT DO NOTHING",
        )
        .bind(client_id)
        .bind(&label_ids)
        .execute(&mut *conn)
        .await?;

        labels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(labels)
    }

    /// Labels attached to one client, ordered by name.
    pub async fn list_for_client(pool: &PgPool, client_id: DbId) -> Result<Vec<Label>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM labels l
             JOIN client_labels cl ON cl.label_id = l.id
             WHERE cl.client_id = $1
             ORDER BY l.name"
        );
        sqlx::query_as::<_, Label>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Labels of several clients in one query, keyed by client id.
    pub async fn list_for_clients(
        pool: &PgPool,
        client_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Label>>, sqlx::Error> {
        let query = format!(
            "SELECT cl.client_id, {COLUMNS} FROM labels l
             JOIN client_labels cl ON cl.label_id = l.id
             WHERE cl.client_id = ANY($1)
             ORDER BY l.name"
        );
        let rows = sqlx::query_as::<_, ClientLabelRow>(&query)
            .bind(client_ids)
            .fetch_all(pool)
            .await?;

        let mut by_client: HashMap<DbId, Vec<Label>> = HashMap::new();
        for row in rows {
            by_client.entry(row.client_id).or_default().push(row.label);
        }
        Ok(by_client)
    }
}
