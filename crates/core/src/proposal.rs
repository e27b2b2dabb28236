//! The proposal award transition.
//!
//! A proposal moving into [`ProposalStatus::Awarded`] from any other status
//! yields a [`ProposalAwarded`] event. The event carries everything needed to
//! build the follow-up project, so the consumer never re-reads the proposal.
//! Re-saving an already awarded proposal yields nothing.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::project::{ProjectDraft, AWARDED_PENDING_PERCENTAGE};
use crate::status::{ProjectStatus, ProposalStatus};
use crate::types::{DbId, Timestamp};

/// Event name published on the bus after an award.
pub const EVENT_PROPOSAL_AWARDED: &str = "proposal.awarded";

/// Whether an update from `previous` to `requested` awards the proposal.
///
/// `requested` is `None` when the update leaves the status untouched.
pub fn is_award(previous: ProposalStatus, requested: Option<ProposalStatus>) -> bool {
    requested == Some(ProposalStatus::Awarded) && previous != ProposalStatus::Awarded
}

/// A proposal has just been awarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalAwarded {
    pub proposal_id: DbId,
    pub client_id: DbId,
    pub contact_id: Option<DbId>,
    pub name: String,
    pub proposal_number: Option<Amount>,
    pub amount: Option<Amount>,
    pub awarded_at: Timestamp,
}

impl ProposalAwarded {
    /// The project every award produces.
    ///
    /// The full amount is outstanding: balance equals amount and the project
    /// is 100% pending. A proposal without an amount yields zero.
    pub fn project_draft(&self) -> ProjectDraft {
        let amount = self.amount.unwrap_or(Amount::ZERO);
        ProjectDraft {
            client_id: self.client_id,
            contact_id: self.contact_id,
            name: self.name.clone(),
            proposal_number: self.proposal_number,
            amount: Some(amount),
            purchase_order: Some(Amount::ZERO),
            url: String::new(),
            effective_date: Some(self.awarded_at),
            balance: Some(amount),
            pending_percentage: AWARDED_PENDING_PERCENTAGE,
            status: ProjectStatus::NotStarted,
        }
    }
}
