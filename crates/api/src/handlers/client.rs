//! Handlers for the `/clients` resource.

use arquimetal_core::error::CoreError;
use arquimetal_core::types::DbId;
use arquimetal_db::models::client::{
    ClientDetail, ClientListParams, ClientWithLabels, CreateClient, UpdateClient,
};
use arquimetal_db::repositories::ClientRepo;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::ensure_client_exists;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/clients
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateClient>,
) -> AppResult<(StatusCode, Json<DataResponse<ClientWithLabels>>)> {
    input.validate()?;
    let client = ClientRepo::create(&state.pool, &input).await?;
    tracing::info!(client_id = client.client.id, "Client created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// GET /api/v1/clients
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ClientListParams>,
) -> AppResult<Json<DataResponse<Vec<ClientWithLabels>>>> {
    let clients = ClientRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ClientDetail>>> {
    let client = ClientRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    Ok(Json(DataResponse { data: client }))
}

/// PATCH /api/v1/clients/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateClient>,
) -> AppResult<Json<DataResponse<ClientWithLabels>>> {
    input.validate()?;
    let client = ClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/v1/clients/{id}
///
/// 409 while proposals or projects still reference the client.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    ensure_client_exists(&state.pool, id).await?;
    let (proposals, projects) = ClientRepo::count_dependents(&state.pool, id).await?;
    if proposals > 0 || projects > 0 {
        return Err(CoreError::Conflict(format!(
            "Client {id} still has {proposals} proposal(s) and {projects} project(s); \
             remove dependent records first"
        ))
        .into());
    }

    // The foreign keys still guard against a reference added since the check.
    let deleted = ClientRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(client_id = id, "Client deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))
    }
}
