//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod client_repo;
pub mod contact_repo;
pub mod invoice_repo;
pub mod label_repo;
pub mod number_repo;
pub mod project_repo;
pub mod proposal_repo;

pub use client_repo::ClientRepo;
pub use contact_repo::ContactRepo;
pub use invoice_repo::InvoiceRepo;
pub use label_repo::LabelRepo;
pub use number_repo::NumberRepo;
pub use project_repo::ProjectRepo;
pub use proposal_repo::{ProposalRepo, ProposalUpdate};
