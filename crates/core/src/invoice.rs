//! Defaults applied to every new invoice.

use crate::amount::Amount;

/// Amount of a freshly created invoice.
pub const NEW_INVOICE_AMOUNT: Amount = Amount::ZERO;

/// Observations text of a freshly created invoice.
pub const NEW_INVOICE_OBSERVATIONS: &str = "";
