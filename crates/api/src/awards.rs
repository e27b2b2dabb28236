//! Turns a proposal award into its project.
//!
//! [`create_awarded_project`] is the only place that reacts to a
//! [`ProposalAwarded`] event by writing to the database. Observers on the
//! event bus only see the outcome.

use arquimetal_core::proposal::ProposalAwarded;
use arquimetal_db::models::project::Project;
use arquimetal_db::repositories::ProjectRepo;
use arquimetal_events::DomainEvent;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Insert the project for an award that has already been committed, then
/// announce both the award and the new project on the event bus.
///
/// Any failure is reported as [`AppError::AwardFollowUp`], since the proposal
/// itself is already saved as awarded.
pub async fn create_awarded_project(
    state: &AppState,
    award: &ProposalAwarded,
    actor: &str,
) -> AppResult<Project> {
    let draft = award.project_draft();
    let follow_up = |reason: String| AppError::AwardFollowUp {
        proposal_id: award.proposal_id,
        reason,
    };

    draft.validate().map_err(|e| follow_up(e.to_string()))?;
    let project = ProjectRepo::create(&state.pool, &draft)
        .await
        .map_err(|e| follow_up(e.to_string()))?;

    tracing::info!(
        proposal_id = award.proposal_id,
        project_id = project.id,
        project_number = project.project_number,
        "Project created from awarded proposal"
    );

    state
        .event_bus
        .publish(DomainEvent::proposal_awarded(award).with_actor(actor));
    state.event_bus.publish(
        DomainEvent::project_created(project.id, project.project_number, Some(award.proposal_id))
            .with_actor(actor),
    );

    Ok(project)
}
