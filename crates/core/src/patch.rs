//! PATCH fields that can be cleared.
//!
//! Most update DTOs treat `null` like an absent field. A clearable reference
//! such as a proposal's responsible contact needs three states instead, held
//! in an `Option<Option<T>>`:
//!
//! | JSON              | Value            | Meaning        |
//! |-------------------|------------------|----------------|
//! | field absent      | `None`           | leave as is    |
//! | `null`            | `Some(None)`     | clear          |
//! | value             | `Some(Some(v))`  | set            |

use serde::{Deserialize, Deserializer};

/// Deserialize a clearable field. Use together with `#[serde(default)]`, so
/// that an absent field stays `None`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        contact_id: Option<Option<i64>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"contact_id": null}"#).unwrap();
        let set: Patch = serde_json::from_str(r#"{"contact_id": 7}"#).unwrap();
        assert_eq!(absent.contact_id, None);
        assert_eq!(null.contact_id, Some(None));
        assert_eq!(set.contact_id, Some(Some(7)));
    }
}
