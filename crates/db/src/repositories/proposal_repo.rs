//! Repository for the `proposals` table.

use arquimetal_core::status::ProposalStatus;
use arquimetal_core::types::DbId;
use sqlx::PgPool;

use crate::models::proposal::{CreateProposal, Proposal, ProposalListParams, UpdateProposal};
use crate::repositories::ContactRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, contact_id, name, status, amount, proposal_number, \
    survey_notes, response_notes, revision_notes, detail, delivery_channel, \
    reception_channel, received_at, tender_date, location, sector, created_at, updated_at";

/// Result of a committed proposal update.
#[derive(Debug, Clone)]
pub struct ProposalUpdate {
    /// Status read under the row lock before the update was applied.
    pub previous_status: ProposalStatus,
    pub proposal: Proposal,
}

/// Provides CRUD operations for proposals.
pub struct ProposalRepo;

impl ProposalRepo {
    /// Insert a new proposal. The status always starts as `opportunity`.
    pub async fn create(pool: &PgPool, input: &CreateProposal) -> Result<Proposal, sqlx::Error> {
        let query = format!(
            "INSERT INTO proposals
                (client_id, contact_id, name, status, amount, proposal_number,
                 survey_notes, response_notes, revision_notes, detail,
                 delivery_channel, reception_channel, received_at, tender_date,
                 location, sector)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(input.client_id)
            .bind(input.contact_id)
            .bind(input.name.trim())
            .bind(ProposalStatus::default())
            .bind(input.amount)
            .bind(input.proposal_number)
            .bind(&input.survey_notes)
            .bind(&input.response_notes)
            .bind(&input.revision_notes)
            .bind(&input.detail)
            .bind(&input.delivery_channel)
            .bind(&input.reception_channel)
            .bind(input.received_at)
            .bind(input.tender_date)
            .bind(&input.location)
            .bind(&input.sector)
            .fetch_one(pool)
            .await
    }

    /// Find a proposal by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM proposals WHERE id = $1");
        sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List proposals, newest first, optionally filtered by client and status.
    pub async fn list(
        pool: &PgPool,
        params: &ProposalListParams,
    ) -> Result<Vec<Proposal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM proposals
             WHERE ($1::bigint IS NULL OR client_id = $1)
               AND ($2::text IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(params.client_id)
            .bind(params.status)
            .fetch_all(pool)
            .await
    }

    /// Update a proposal. Only non-`None` fields in `input` are applied;
    /// `contact_id: null` clears the responsible contact. A `contact_phone`
    /// is written to the proposal's contact as it stands after the update.
    ///
    /// The current status is read with `SELECT ... FOR UPDATE` in the same
    /// transaction as the update, so the returned `previous_status` is exactly
    /// what this update overwrote. Concurrent updates of the same proposal
    /// serialize on the row lock.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProposal,
    ) -> Result<Option<ProposalUpdate>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<ProposalStatus> =
            sqlx::query_scalar("SELECT status FROM proposals WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(previous_status) = previous else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE proposals SET
                client_id = COALESCE($2, client_id),
                contact_id = CASE WHEN $3 THEN $4 ELSE contact_id END,
                name = COALESCE($5, name),
                status = COALESCE($6, status),
                amount = COALESCE($7, amount),
                proposal_number = COALESCE($8, proposal_number),
                survey_notes = COALESCE($9, survey_notes),
                response_notes = COALESCE($10, response_notes),
                revision_notes = COALESCE($11, revision_notes),
                detail = COALESCE($12, detail),
                delivery_channel = COALESCE($13, delivery_channel),
                reception_channel = COALESCE($14, reception_channel),
                received_at = COALESCE($15, received_at),
                tender_date = COALESCE($16, tender_date),
                location = COALESCE($17, location),
                sector = COALESCE($18, sector),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let proposal = sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .bind(input.client_id)
            .bind(input.contact_id.is_some())
            .bind(input.contact_id.flatten())
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.status)
            .bind(input.amount)
            .bind(input.proposal_number)
            .bind(&input.survey_notes)
            .bind(&input.response_notes)
            .bind(&input.revision_notes)
            .bind(&input.detail)
            .bind(&input.delivery_channel)
            .bind(&input.reception_channel)
            .bind(input.received_at)
            .bind(input.tender_date)
            .bind(&input.location)
            .bind(&input.sector)
            .fetch_one(&mut *tx)
            .await?;

        if let (Some(phone), Some(contact_id)) = (input.contact_phone, proposal.contact_id) {
            ContactRepo::set_phone(&mut tx, contact_id, phone).await?;
        }

        tx.commit().await?;
        Ok(Some(ProposalUpdate {
            previous_status,
            proposal,
        }))
    }

    /// Delete a proposal. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM proposals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
