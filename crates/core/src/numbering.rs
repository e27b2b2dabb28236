//! Sequential numbering for projects and invoices.
//!
//! Project numbers are one global sequence; invoice numbers restart at
//! [`FIRST_NUMBER`] inside every project. The repository layer keeps the last
//! issued value per scope in the `number_counters` table and relies on
//! [`next_number`] for the arithmetic.
//!
//! Project numbers leave the service as digit strings, like every other
//! large identifier (see [`serialize_as_digits`]).

use serde::Serializer;

use crate::types::DbId;

/// The first number issued in any scope.
pub const FIRST_NUMBER: i64 = 1;

/// Counter scope name for project numbers.
pub const SCOPE_PROJECT: &str = "project";

/// Counter scope name for invoice numbers.
pub const SCOPE_INVOICE: &str = "invoice";

/// A numbering sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberScope {
    /// One sequence shared by every project regardless of client.
    Project,
    /// One sequence per project for its invoices.
    Invoice { project_id: DbId },
}

impl NumberScope {
    /// The `(scope, scope_id)` key of the counter row.
    pub fn key(self) -> (&'static str, DbId) {
        match self {
            NumberScope::Project => (SCOPE_PROJECT, 0),
            NumberScope::Invoice { project_id } => (SCOPE_INVOICE, project_id),
        }
    }
}

/// The number following `last`, or [`FIRST_NUMBER`] for an empty scope.
pub fn next_number(last: Option<i64>) -> i64 {
    match last {
        Some(n) if n >= FIRST_NUMBER => n + 1,
        _ => FIRST_NUMBER,
    }
}

/// `serialize_with` target that writes a number as a decimal-digit string.
pub fn serialize_as_digits<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Numbered {
        #[serde(serialize_with = "serialize_as_digits")]
        project_number: i64,
    }

    #[test]
    fn empty_scope_starts_at_one() {
        assert_eq!(next_number(None), 1);
    }

    #[test]
    fn increments_from_last() {
        assert_eq!(next_number(Some(1)), 2);
        assert_eq!(next_number(Some(41)), 42);
    }

    #[test]
    fn serial_sequence_has_no_gaps() {
        let mut last = Some(7);
        let issued: Vec<i64> = (0..5)
            .map(|_| {
                let n = next_number(last);
                last = Some(n);
                n
            })
            .collect();
        assert_eq!(issued, vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn zero_is_treated_as_empty() {
        assert_eq!(next_number(Some(0)), 1);
    }

    #[test]
    fn scope_keys() {
        assert_eq!(NumberScope::Project.key(), ("project", 0));
        assert_eq!(
            NumberScope::Invoice { project_id: 9 }.key(),
            ("invoice", 9)
        );
    }

    #[test]
    fn numbers_serialize_as_digit_strings() {
        let json = serde_json::to_value(Numbered {
            project_number: 9_007_199_254_740_993,
        })
        .unwrap();
        assert_eq!(json["project_number"], "9007199254740993");
    }
}
