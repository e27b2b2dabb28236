//! Route definitions for the `/clients` resource and its contacts.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{client, contact};
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PATCH  /{id}                          -> update
/// DELETE /{id}                          -> delete
///
/// GET    /{client_id}/contacts          -> list_by_client
/// POST   /{client_id}/contacts          -> create
/// PATCH  /{client_id}/contacts/{id}     -> update
/// DELETE /{client_id}/contacts/{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    let contact_routes = Router::new()
        .route("/", get(contact::list_by_client).post(contact::create))
        .route("/{id}", patch(contact::update).delete(contact::delete));

    Router::new()
        .route("/", get(client::list).post(client::create))
        .route(
            "/{id}",
            get(client::get_by_id)
                .patch(client::update)
                .delete(client::delete),
        )
        .nest("/{client_id}/contacts", contact_routes)
}
