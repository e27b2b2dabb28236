//! Repository for the `clients` table.

use arquimetal_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{
    Client, ClientDetail, ClientListParams, ClientWithLabels, CreateClient, UpdateClient,
};
use crate::repositories::{ContactRepo, LabelRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, industry, responsible_name, responsible_title, \
    contact_number, national_id, email, notes, created_at, updated_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client and attach its labels in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateClient,
    ) -> Result<ClientWithLabels, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO clients
                (name, industry, responsible_name, responsible_title,
                 contact_number, national_id, email, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(input.name.trim())
            .bind(input.industry.trim())
            .bind(input.responsible_name.trim())
            .bind(input.responsible_title.trim())
            .bind(input.contact_number)
            .bind(input.national_id)
            .bind(input.email.trim())
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let labels = LabelRepo::replace_for_client(&mut tx, client.id, &input.labels).await?;

        tx.commit().await?;
        Ok(ClientWithLabels { client, labels })
    }

    /// Find a client by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a client with its labels and contacts.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<ClientDetail>, sqlx::Error> {
        let Some(client) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let labels = LabelRepo::list_for_client(pool, id).await?;
        let contacts = ContactRepo::list_by_client(pool, id).await?;
        Ok(Some(ClientDetail {
            client,
            labels,
            contacts,
        }))
    }

    /// List clients ordered by name, optionally filtered.
    ///
    /// `name` matches case-insensitively anywhere in the name; `industry`
    /// must match exactly.
    pub async fn list(
        pool: &PgPool,
        params: &ClientListParams,
    ) -> Result<Vec<ClientWithLabels>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR industry = $2)
             ORDER BY name, id"
        );
        let clients = sqlx::query_as::<_, Client>(&query)
            .bind(&params.name)
            .bind(&params.industry)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = clients.iter().map(|c| c.id).collect();
        let mut labels = LabelRepo::list_for_clients(pool, &ids).await?;

        Ok(clients
            .into_iter()
            .map(|client| {
                let labels = labels.remove(&client.id).unwrap_or_default();
                ClientWithLabels { client, labels }
            })
            .collect())
    }

    /// Update a client. Only non-`None` fields in `input` are applied; a
    /// present `labels` list replaces the label set.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<ClientWithLabels>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE clients SET
                name = COALESCE($2, name),
                industry = COALESCE($3, industry),
                responsible_name = COALESCE($4, responsible_name),
                responsible_title = COALESCE($5, responsible_title),
                contact_number = COALESCE($6, contact_number),
                national_id = COALESCE($7, national_id),
                email = COALESCE($8, email),
                notes = COALESCE($9, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(client) = sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.industry.as_deref().map(str::trim))
            .bind(input.responsible_name.as_deref().map(str::trim))
            .bind(input.responsible_title.as_deref().map(str::trim))
            .bind(input.contact_number)
            .bind(input.national_id)
            .bind(input.email.as_deref().map(str::trim))
            .bind(&input.notes)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(names) = &input.labels {
            LabelRepo::replace_for_client(&mut tx, id, names).await?;
        }
        tx.commit().await?;

        let labels = LabelRepo::list_for_client(pool, id).await?;
        Ok(Some(ClientWithLabels { client, labels }))
    }

    /// Number of proposals and projects referencing the client.
    pub async fn count_dependents(pool: &PgPool, id: DbId) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM proposals WHERE client_id = $1),
                (SELECT COUNT(*) FROM projects WHERE client_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Delete a client and, by cascade, its contacts and label links.
    ///
    /// Fails with a foreign-key violation while proposals or projects still
    /// reference the client. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
