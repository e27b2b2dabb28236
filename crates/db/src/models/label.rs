//! Client label model.

use serde::Serialize;
use sqlx::FromRow;
use arquimetal_core::types::{DbId, Timestamp};

/// A row from the `labels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Label {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Trim label names, drop blanks and duplicates, keep first-seen order.
pub fn normalize_label_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let trimmed = name.trim();
        if !trimmed.is_empty() && !out.iter().any(|n| n == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blanks_and_duplicates_are_dropped() {
        let names = vec![
            " Minería ".to_string(),
            "".to_string(),
            "Minería".to_string(),
            "Energía".to_string(),
        ];
        assert_eq!(normalize_label_names(&names), vec!["Minería", "Energía"]);
    }
}
