//! Client contact model and DTOs.

use arquimetal_core::amount::{blank_as_none, Amount};
use arquimetal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::not_blank;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub client_id: DbId,
    pub name: String,
    pub job_title: String,
    pub national_id: Amount,
    pub phone: Amount,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a contact under a client. The client comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContact {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Contact name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Contact job title is required"))]
    pub job_title: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "Contact national id is required"))]
    pub national_id: Option<Amount>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "Contact phone number is required"))]
    pub phone: Option<Amount>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a contact. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateContact {
    #[validate(custom(function = "not_blank", message = "Contact name must not be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank", message = "Contact job title must not be empty"))]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub national_id: Option<Amount>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone: Option<Amount>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub notes: Option<String>,
}
