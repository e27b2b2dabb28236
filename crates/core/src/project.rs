//! Project field rules and the insert-ready [`ProjectDraft`].

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::CoreError;
use crate::status::ProjectStatus;
use crate::types::{DbId, Timestamp};

/// Upper bound of `pending_percentage`.
pub const MAX_PENDING_PERCENTAGE: i32 = 100;

/// Pending percentage of a project created from an awarded proposal.
pub const AWARDED_PENDING_PERCENTAGE: i32 = MAX_PENDING_PERCENTAGE;

/// Pending percentage of a directly created project when none is given.
pub const DEFAULT_PENDING_PERCENTAGE: i32 = 0;

/// Validate that a pending percentage lies within `0..=100`.
pub fn validate_pending_percentage(value: i32) -> Result<(), CoreError> {
    if (0..=MAX_PENDING_PERCENTAGE).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "pending_percentage must be between 0 and {MAX_PENDING_PERCENTAGE}, got {value}"
        )))
    }
}

/// Every column of a new project except the id and the project number,
/// which the repository assigns at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub client_id: DbId,
    pub contact_id: Option<DbId>,
    pub name: String,
    pub proposal_number: Option<Amount>,
    pub amount: Option<Amount>,
    pub purchase_order: Option<Amount>,
    pub url: String,
    pub effective_date: Option<Timestamp>,
    pub balance: Option<Amount>,
    pub pending_percentage: i32,
    pub status: ProjectStatus,
}

impl ProjectDraft {
    /// Check the invariants a draft must satisfy before it is inserted.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Name is required".into()));
        }
        validate_pending_percentage(self.pending_percentage)
    }
}
