//! Repository for the `contacts` table.
//!
//! Contacts are always addressed through their owning client.

use arquimetal_core::amount::Amount;
use arquimetal_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::contact::{Contact, CreateContact, UpdateContact};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, client_id, name, job_title, national_id, phone, email, notes, created_at, updated_at";

/// Provides CRUD operations for contacts.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact under `client_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        input: &CreateContact,
    ) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (client_id, name, job_title, national_id, phone, email, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(client_id)
            .bind(input.name.trim())
            .bind(input.job_title.trim())
            .bind(input.national_id)
            .bind(input.phone)
            .bind(&input.email)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a contact by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the contacts of a client ordered by name.
    pub async fn list_by_client(pool: &PgPool, client_id: DbId) -> Result<Vec<Contact>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM contacts WHERE client_id = $1 ORDER BY name, id");
        sqlx::query_as::<_, Contact>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Update a contact of `client_id`. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the contact does not exist under that client.
    pub async fn update(
        pool: &PgPool,
        client_id: DbId,
        id: DbId,
        input: &UpdateContact,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET
                name = COALESCE($3, name),
                job_title = COALESCE($4, job_title),
                national_id = COALESCE($5, national_id),
                phone = COALESCE($6, phone),
                email = COALESCE($7, email),
                notes = COALESCE($8, notes),
                updated_at = NOW()
             WHERE id = $1 AND client_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(client_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.job_title.as_deref().map(str::trim))
            .bind(input.national_id)
            .bind(input.phone)
            .bind(&input.email)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a contact's phone number inside the caller's transaction.
    pub async fn set_phone(
        conn: &mut PgConnection,
        id: DbId,
        phone: Amount,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE contacts SET phone = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(phone)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Delete a contact of `client_id`. References from proposals and
    /// projects are set to `NULL`. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, client_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
