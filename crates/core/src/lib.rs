//! Domain types and pure business rules for the Arquimetal backend.
//!
//! Nothing in this crate touches the database or HTTP. The rules here are
//! shared by the repository layer (`arquimetal-db`) and the HTTP layer
//! (`arquimetal-api`).

pub mod amount;
pub mod error;
pub mod invoice;
pub mod numbering;
pub mod patch;
pub mod project;
pub mod proposal;
pub mod status;
#[cfg(feature = "sqlx")]
mod sqlx_support;
pub mod types;
