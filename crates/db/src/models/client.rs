//! Client model and DTOs.

use arquimetal_core::amount::{blank_as_none, Amount};
use arquimetal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::contact::Contact;
use super::label::Label;
use super::not_blank;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub industry: String,
    pub responsible_name: String,
    pub responsible_title: String,
    pub contact_number: Amount,
    pub national_id: Amount,
    pub email: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A client with its labels and contacts.
#[derive(Debug, Clone, Serialize)]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    pub labels: Vec<Label>,
    pub contacts: Vec<Contact>,
}

/// A client with its labels, as returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ClientWithLabels {
    #[serde(flatten)]
    pub client: Client,
    pub labels: Vec<Label>,
}

/// DTO for creating a client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClient {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Industry is required"))]
    pub industry: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Responsible name is required"))]
    pub responsible_name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Responsible title is required"))]
    pub responsible_title: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "Contact number is required"))]
    pub contact_number: Option<Amount>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(required(message = "National id is required"))]
    pub national_id: Option<Amount>,
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    pub notes: Option<String>,
    /// Label names; unknown names are created.
    #[serde(default)]
    pub labels: Vec<String>,
}

/// DTO for updating a client. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClient {
    #[validate(custom(function = "not_blank", message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank", message = "Industry must not be empty"))]
    pub industry: Option<String>,
    #[validate(custom(function = "not_blank", message = "Responsible name must not be empty"))]
    pub responsible_name: Option<String>,
    #[validate(custom(function = "not_blank", message = "Responsible title must not be empty"))]
    pub responsible_title: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub contact_number: Option<Amount>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub national_id: Option<Amount>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub notes: Option<String>,
    /// If `Some`, replaces the label set. If `None`, leaves it unchanged.
    pub labels: Option<Vec<String>>,
}

/// Query parameters for `GET /clients`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientListParams {
    pub name: Option<String>,
    pub industry: Option<String>,
}
