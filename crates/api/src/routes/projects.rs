//! Route definitions for the `/projects` resource.
//!
//! Also nests the invoice sub-ledger under `/projects/{project_id}/invoices`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{invoice, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PATCH  /{id}                              -> update
/// DELETE /{id}                              -> delete
///
/// GET    /{project_id}/invoices             -> list_by_project
/// POST   /{project_id}/invoices             -> create
/// PATCH  /{project_id}/invoices/{id}        -> update
/// DELETE /{project_id}/invoices/{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    let invoice_routes = Router::new()
        .route("/", get(invoice::list_by_project).post(invoice::create))
        .route("/{id}", patch(invoice::update).delete(invoice::delete));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .patch(project::update)
                .delete(project::delete),
        )
        .nest("/{project_id}/invoices", invoice_routes)
}
