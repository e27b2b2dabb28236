//! Handlers for the `/proposals` resource.
//!
//! `PATCH /proposals/{id}` is where the award trigger lives: when the update
//! moves the proposal into `awarded` from any other status, a project is
//! created from it once the update has committed.

use arquimetal_core::error::CoreError;
use arquimetal_core::proposal::is_award;
use arquimetal_core::types::DbId;
use arquimetal_db::models::project::Project;
use arquimetal_db::models::proposal::{
    CreateProposal, Proposal, ProposalListParams, UpdateProposal,
};
use arquimetal_db::repositories::{ProposalRepo, ProposalUpdate};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use super::ensure_references;
use crate::awards::create_awarded_project;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `PATCH /proposals/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdatedProposal {
    #[serde(flatten)]
    pub proposal: Proposal,
    /// The project created by this update, if it awarded the proposal.
    pub awarded_project: Option<Project>,
}

fn proposal_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Proposal",
        id,
    })
}

/// POST /api/v1/proposals
///
/// The status of a new proposal is always `opportunity`.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProposal>,
) -> AppResult<(StatusCode, Json<DataResponse<Proposal>>)> {
    input.validate()?;
    let client_id = input
        .client_id
        .ok_or_else(|| CoreError::Validation("Client is required".into()))?;
    ensure_references(&state.pool, client_id, input.contact_id).await?;

    let proposal = ProposalRepo::create(&state.pool, &input).await?;
    tracing::info!(proposal_id = proposal.id, client_id, "Proposal created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: proposal })))
}

/// GET /api/v1/proposals
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ProposalListParams>,
) -> AppResult<Json<DataResponse<Vec<Proposal>>>> {
    let proposals = ProposalRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: proposals }))
}

/// GET /api/v1/proposals/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Proposal>>> {
    let proposal = ProposalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| proposal_not_found(id))?;
    Ok(Json(DataResponse { data: proposal }))
}

/// PATCH /api/v1/proposals/{id}
///
/// Awarding (`status: "awarded"` on a proposal that was not awarded) creates
/// exactly one project. If that step fails after the update committed, the
/// response is 500 `PROJECT_CREATION_FAILED`.
///
/// `contact_id: null` removes the responsible contact. `contact_phone`
/// updates the phone of the contact the proposal points to after the update,
/// and is rejected when there is none.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProposal>,
) -> AppResult<Json<DataResponse<UpdatedProposal>>> {
    input.validate()?;

    let current = ProposalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| proposal_not_found(id))?;
    let client_id = input.client_id.unwrap_or(current.client_id);
    let contact_id = input.contact_id.unwrap_or(current.contact_id);
    if input.client_id.is_some() || input.contact_id.is_some() {
        ensure_references(&state.pool, client_id, contact_id).await?;
    }
    if input.contact_phone.is_some() && contact_id.is_none() {
        return Err(CoreError::Validation(
            "contact_phone needs a responsible contact on the proposal".into(),
        )
        .into());
    }

    let ProposalUpdate {
        previous_status,
        proposal,
    } = ProposalRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| proposal_not_found(id))?;

    let awarded_project = if is_award(previous_status, input.status) {
        let award = proposal.awarded_event();
        Some(create_awarded_project(&state, &award, &auth.subject).await?)
    } else {
        None
    };

    Ok(Json(DataResponse {
        data: UpdatedProposal {
            proposal,
            awarded_project,
        },
    }))
}

/// DELETE /api/v1/proposals/{id}
///
/// Projects created from the proposal are kept.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if ProposalRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(proposal_not_found(id))
    }
}
