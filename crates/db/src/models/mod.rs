//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod client;
pub mod contact;
pub mod invoice;
pub mod label;
pub mod project;
pub mod proposal;

use validator::ValidationError;

/// Rejects text that is empty once trimmed. Names are stored trimmed, so
/// `"   "` would otherwise become an empty name.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
