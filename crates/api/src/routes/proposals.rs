//! Route definitions for the `/proposals` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::proposal;
use crate::state::AppState;

/// Routes mounted at `/proposals`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PATCH  /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(proposal::list).post(proposal::create))
        .route(
            "/{id}",
            get(proposal::get_by_id)
                .patch(proposal::update)
                .delete(proposal::delete),
        )
}
