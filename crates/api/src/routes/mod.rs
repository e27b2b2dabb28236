pub mod clients;
pub mod health;
pub mod projects;
pub mod proposals;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree. Every route requires a Bearer token.
///
/// Route hierarchy:
///
/// ```text
/// /clients                                         list, create
/// /clients/{id}                                    get, update, delete
/// /clients/{client_id}/contacts                    list, create
/// /clients/{client_id}/contacts/{id}               update, delete
///
/// /proposals                                       list, create
/// /proposals/{id}                                  get, update (award trigger), delete
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{project_id}/invoices                  list, create (next number)
/// /projects/{project_id}/invoices/{id}             update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clients", clients::router())
        .nest("/proposals", proposals::router())
        .nest("/projects", projects::router())
}
