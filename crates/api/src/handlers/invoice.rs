//! Handlers for invoices nested under `/projects/{project_id}/invoices`.

use arquimetal_core::error::CoreError;
use arquimetal_core::types::DbId;
use arquimetal_db::models::invoice::{Invoice, UpdateInvoice};
use arquimetal_db::repositories::InvoiceRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::ensure_project_exists;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn invoice_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Invoice",
        id,
    })
}

/// GET /api/v1/projects/{project_id}/invoices
pub async fn list_by_project(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<Invoice>>>> {
    ensure_project_exists(&state.pool, project_id).await?;
    let invoices = InvoiceRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: invoices }))
}

/// POST /api/v1/projects/{project_id}/invoices
///
/// Takes no body. The invoice gets the next number within the project.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Invoice>>)> {
    ensure_project_exists(&state.pool, project_id).await?;
    let invoice = InvoiceRepo::create_next(&state.pool, project_id).await?;
    tracing::info!(
        project_id,
        invoice_id = invoice.id,
        invoice_number = invoice.invoice_number,
        "Invoice created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: invoice })))
}

/// PATCH /api/v1/projects/{project_id}/invoices/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath((project_id, id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateInvoice>,
) -> AppResult<Json<DataResponse<Invoice>>> {
    input.validate()?;
    ensure_project_exists(&state.pool, project_id).await?;
    let invoice = InvoiceRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or_else(|| invoice_not_found(id))?;
    Ok(Json(DataResponse { data: invoice }))
}

/// DELETE /api/v1/projects/{project_id}/invoices/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath((project_id, id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project_exists(&state.pool, project_id).await?;
    if InvoiceRepo::delete(&state.pool, project_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(invoice_not_found(id))
    }
}
