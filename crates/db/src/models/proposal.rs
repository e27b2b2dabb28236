//! Proposal model and DTOs.

use arquimetal_core::amount::{blank_as_none, Amount};
use arquimetal_core::patch::nullable;
use arquimetal_core::proposal::ProposalAwarded;
use arquimetal_core::status::ProposalStatus;
use arquimetal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::not_blank;

/// A row from the `proposals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Proposal {
    pub id: DbId,
    pub client_id: DbId,
    pub contact_id: Option<DbId>,
    pub name: String,
    pub status: ProposalStatus,
    pub amount: Option<Amount>,
    pub proposal_number: Option<Amount>,
    pub survey_notes: Option<String>,
    pub response_notes: Option<String>,
    pub revision_notes: Option<String>,
    pub detail: Option<String>,
    pub delivery_channel: Option<String>,
    pub reception_channel: Option<String>,
    pub received_at: Option<Timestamp>,
    pub tender_date: Option<Timestamp>,
    pub location: Option<String>,
    pub sector: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Proposal {
    /// The award event for this proposal as it now stands.
    pub fn awarded_event(&self) -> ProposalAwarded {
        ProposalAwarded {
            proposal_id: self.id,
            client_id: self.client_id,
            contact_id: self.contact_id,
            name: self.name.clone(),
            proposal_number: self.proposal_number,
            amount: self.amount,
            awarded_at: self.updated_at,
        }
    }
}

/// DTO for creating a proposal. New proposals always start as `opportunity`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProposal {
    #[validate(required(message = "Client is required"))]
    pub client_id: Option<DbId>,
    pub contact_id: Option<DbId>,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub amount: Option<Amount>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub proposal_number: Option<Amount>,
    pub survey_notes: Option<String>,
    pub response_notes: Option<String>,
    pub revision_notes: Option<String>,
    pub detail: Option<String>,
    pub delivery_channel: Option<String>,
    pub reception_channel: Option<String>,
    pub received_at: Option<Timestamp>,
    pub tender_date: Option<Timestamp>,
    pub location: Option<String>,
    pub sector: Option<String>,
}

/// DTO for updating a proposal. All fields are optional.
///
/// Setting `status` to `awarded` from any other status creates a project.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProposal {
    pub client_id: Option<DbId>,
    /// `null` removes the responsible contact.
    #[serde(default, deserialize_with = "nullable")]
    pub contact_id: Option<Option<DbId>>,
    /// New phone number for the responsible contact, written to the contact
    /// record in the same transaction as the proposal.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub contact_phone: Option<Amount>,
    #[validate(custom(function = "not_blank", message = "Name must not be empty"))]
    pub name: Option<String>,
    pub status: Option<ProposalStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub amount: Option<Amount>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub proposal_number: Option<Amount>,
    pub survey_notes: Option<String>,
    pub response_notes: Option<String>,
    pub revision_notes: Option<String>,
    pub detail: Option<String>,
    pub delivery_channel: Option<String>,
    pub reception_channel: Option<String>,
    pub received_at: Option<Timestamp>,
    pub tender_date: Option<Timestamp>,
    pub location: Option<String>,
    pub sector: Option<String>,
}

/// Query parameters for `GET /proposals`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposalListParams {
    pub client_id: Option<DbId>,
    pub status: Option<ProposalStatus>,
}
