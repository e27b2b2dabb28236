//! Project model and DTOs.

use arquimetal_core::amount::{blank_as_none, Amount};
use arquimetal_core::numbering::serialize_as_digits;
use arquimetal_core::patch::nullable;
use arquimetal_core::project::{ProjectDraft, DEFAULT_PENDING_PERCENTAGE};
use arquimetal_core::status::ProjectStatus;
use arquimetal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::not_blank;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: DbId,
    pub contact_id: Option<DbId>,
    pub name: String,
    /// Sent as a digit string.
    #[serde(serialize_with = "serialize_as_digits")]
    pub project_number: i64,
    pub proposal_number: Option<Amount>,
    pub amount: Option<Amount>,
    pub purchase_order: Option<Amount>,
    pub url: String,
    pub effective_date: Option<Timestamp>,
    pub balance: Option<Amount>,
    pub pending_percentage: i32,
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project directly, without a proposal.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(required(message = "Client is required"))]
    pub client_id: Option<DbId>,
    pub contact_id: Option<DbId>,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub proposal_number: Option<Amount>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub amount: Option<Amount>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub purchase_order: Option<Amount>,
    /// Defaults to an empty string.
    pub url: Option<String>,
    pub effective_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub balance: Option<Amount>,
    /// Defaults to 0.
    pub pending_percentage: Option<i32>,
    /// Defaults to `not_started`.
    pub status: Option<ProjectStatus>,
}

impl CreateProject {
    /// Resolve defaults into an insert-ready draft.
    ///
    /// Returns `None` when `client_id` is missing; call `validate` first.
    pub fn into_draft(self) -> Option<ProjectDraft> {
        Some(ProjectDraft {
            client_id: self.client_id?,
            contact_id: self.contact_id,
            name: self.name,
            proposal_number: self.proposal_number,
            amount: self.amount,
            purchase_order: self.purchase_order,
            url: self.url.unwrap_or_default(),
            effective_date: self.effective_date,
            balance: self.balance,
            pending_percentage: self
                .pending_percentage
                .unwrap_or(DEFAULT_PENDING_PERCENTAGE),
            status: self.status.unwrap_or_default(),
        })
    }
}

/// DTO for updating a project. All fields are optional.
///
/// The project number is assigned once and cannot be changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    pub client_id: Option<DbId>,
    /// `null` removes the responsible contact.
    #[serde(default, deserialize_with = "nullable")]
    pub contact_id: Option<Option<DbId>>,
    #[validate(custom(function = "not_blank", message = "Name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub proposal_number: Option<Amount>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub amount: Option<Amount>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub purchase_order: Option<Amount>,
    pub url: Option<String>,
    pub effective_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub balance: Option<Amount>,
    #[validate(range(min = 0, max = 100, message = "pending_percentage must be between 0 and 100"))]
    pub pending_percentage: Option<i32>,
    pub status: Option<ProjectStatus>,
}

/// Query parameters for `GET /projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub client_id: Option<DbId>,
    pub status: Option<ProjectStatus>,
}
