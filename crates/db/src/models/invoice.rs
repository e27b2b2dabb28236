//! Invoice model and DTOs.
//!
//! Invoices are created with an empty body; the number and defaults are
//! assigned by the repository. Only updates carry caller data.

use arquimetal_core::amount::{blank_as_none, Amount};
use arquimetal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `invoices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub project_id: DbId,
    pub invoice_number: i64,
    pub invoice_date: Option<Timestamp>,
    pub amount: Option<Amount>,
    pub accepted_at: Option<Timestamp>,
    pub portal_uploads: i32,
    pub collected_at: Option<Timestamp>,
    pub credit_note: Option<Amount>,
    pub debit_note: Option<Amount>,
    pub collection_reminders: i32,
    pub observations: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating an invoice. Absent, `null` and blank fields are left
/// unchanged. The invoice number is not updatable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInvoice {
    pub invoice_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub amount: Option<Amount>,
    pub accepted_at: Option<Timestamp>,
    #[validate(range(min = 0, message = "portal_uploads must not be negative"))]
    pub portal_uploads: Option<i32>,
    pub collected_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub credit_note: Option<Amount>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub debit_note: Option<Amount>,
    #[validate(range(min = 0, message = "collection_reminders must not be negative"))]
    pub collection_reminders: Option<i32>,
    pub observations: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_null_amounts_are_dropped() {
        let input: UpdateInvoice = serde_json::from_value(serde_json::json!({
            "amount": "",
            "credit_note": null,
            "debit_note": "0",
            "observations": "Enviada"
        }))
        .unwrap();
        assert!(input.amount.is_none());
        assert!(input.credit_note.is_none());
        assert_eq!(input.debit_note, Some(Amount::ZERO));
        assert_eq!(input.observations.as_deref(), Some("Enviada"));
    }

    #[test]
    fn negative_counters_fail_validation() {
        let input: UpdateInvoice =
            serde_json::from_value(serde_json::json!({ "portal_uploads": -1 })).unwrap();
        assert!(input.validate().is_err());
    }
}
