//! Handlers for contacts nested under `/clients/{client_id}/contacts`.

use arquimetal_core::error::CoreError;
use arquimetal_core::types::DbId;
use arquimetal_db::models::contact::{Contact, CreateContact, UpdateContact};
use arquimetal_db::repositories::ContactRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::ensure_client_exists;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn contact_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contact",
        id,
    })
}

/// GET /api/v1/clients/{client_id}/contacts
pub async fn list_by_client(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(client_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<Contact>>>> {
    ensure_client_exists(&state.pool, client_id).await?;
    let contacts = ContactRepo::list_by_client(&state.pool, client_id).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// POST /api/v1/clients/{client_id}/contacts
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(client_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateContact>,
) -> AppResult<(StatusCode, Json<DataResponse<Contact>>)> {
    input.validate()?;
    ensure_client_exists(&state.pool, client_id).await?;
    let contact = ContactRepo::create(&state.pool, client_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: contact })))
}

/// PATCH /api/v1/clients/{client_id}/contacts/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath((client_id, id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateContact>,
) -> AppResult<Json<DataResponse<Contact>>> {
    input.validate()?;
    ensure_client_exists(&state.pool, client_id).await?;
    let contact = ContactRepo::update(&state.pool, client_id, id, &input)
        .await?
        .ok_or_else(|| contact_not_found(id))?;
    Ok(Json(DataResponse { data: contact }))
}

/// DELETE /api/v1/clients/{client_id}/contacts/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath((client_id, id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_client_exists(&state.pool, client_id).await?;
    if ContactRepo::delete(&state.pool, client_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(contact_not_found(id))
    }
}
