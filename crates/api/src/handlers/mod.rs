//! HTTP handlers, one module per resource.
//!
//! Every handler takes [`AuthUser`](crate::middleware::auth::AuthUser) as its
//! first extractor and wraps successful bodies in
//! [`DataResponse`](crate::response::DataResponse).

pub mod client;
pub mod contact;
pub mod invoice;
pub mod project;
pub mod proposal;

use arquimetal_core::error::CoreError;
use arquimetal_core::types::DbId;
use arquimetal_db::repositories::{ClientRepo, ContactRepo, ProjectRepo};
use arquimetal_db::DbPool;

use crate::error::AppResult;

/// 404 unless the client exists.
pub(crate) async fn ensure_client_exists(pool: &DbPool, client_id: DbId) -> AppResult<()> {
    ClientRepo::find_by_id(pool, client_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Client",
            id: client_id,
        })?;
    Ok(())
}

/// 404 unless the project exists.
pub(crate) async fn ensure_project_exists(pool: &DbPool, project_id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        })?;
    Ok(())
}

/// 404 unless the contact exists; 400 unless it belongs to `client_id`.
pub(crate) async fn ensure_contact_of_client(
    pool: &DbPool,
    client_id: DbId,
    contact_id: DbId,
) -> AppResult<()> {
    let contact = ContactRepo::find_by_id(pool, contact_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Contact",
            id: contact_id,
        })?;
    if contact.client_id != client_id {
        return Err(CoreError::Validation(format!(
            "Contact {contact_id} does not belong to client {client_id}"
        ))
        .into());
    }
    Ok(())
}

/// Check the client and contact an insert or update is about to reference.
pub(crate) async fn ensure_references(
    pool: &DbPool,
    client_id: DbId,
    contact_id: Option<DbId>,
) -> AppResult<()> {
    ensure_client_exists(pool, client_id).await?;
    if let Some(contact_id) = contact_id {
        ensure_contact_of_client(pool, client_id, contact_id).await?;
    }
    Ok(())
}
