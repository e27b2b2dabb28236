//! Handlers for the `/projects` resource.

use arquimetal_core::error::CoreError;
use arquimetal_core::types::DbId;
use arquimetal_db::models::project::{CreateProject, Project, ProjectListParams, UpdateProject};
use arquimetal_db::repositories::ProjectRepo;
use arquimetal_events::DomainEvent;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::ensure_references;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn project_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// POST /api/v1/projects
///
/// Direct creation, without a proposal. The project number is assigned here.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    input.validate()?;
    let draft = input
        .into_draft()
        .ok_or_else(|| CoreError::Validation("Client is required".into()))?;
    draft.validate()?;
    ensure_references(&state.pool, draft.client_id, draft.contact_id).await?;

    let project = ProjectRepo::create(&state.pool, &draft).await?;
    tracing::info!(
        project_id = project.id,
        project_number = project.project_number,
        "Project created"
    );
    state.event_bus.publish(
        DomainEvent::project_created(project.id, project.project_number, None)
            .with_actor(auth.subject),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

/// PATCH /api/v1/projects/{id}
///
/// `project_number` cannot be changed and is ignored if sent.
/// `contact_id: null` removes the responsible contact.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    input.validate()?;

    let current = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    if input.client_id.is_some() || input.contact_id.is_some() {
        let client_id = input.client_id.unwrap_or(current.client_id);
        let contact_id = input.contact_id.unwrap_or(current.contact_id);
        ensure_references(&state.pool, client_id, contact_id).await?;
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Removes the project's invoices as well.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(project_id = id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(project_not_found(id))
    }
}
