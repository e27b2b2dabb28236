//! Exact integer amounts that cross the wire as decimal-digit strings.
//!
//! Monetary values, proposal / purchase-order numbers and national-id or phone
//! numbers can exceed the 53-bit range a JSON client can represent exactly.
//! [`Amount`] stores them as a scale-0 [`Decimal`] and always serializes to a
//! string such as `"123456789012345678"`.
//!
//! Accepted inputs are digit strings (with an optional leading `-`) and JSON
//! integers. Fractions, floats, and values longer than [`MAX_DIGITS`] digits
//! are rejected.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;

/// Largest number of digits an amount may carry. Matches `NUMERIC(28, 0)`.
pub const MAX_DIGITS: usize = 28;

/// An exact integer amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Parse a decimal-digit string.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::Validation(format!(
                "'{input}' is not a whole number"
            )));
        }
        if digits.trim_start_matches('0').len() > MAX_DIGITS {
            return Err(CoreError::Validation(format!(
                "'{input}' exceeds {MAX_DIGITS} digits"
            )));
        }

        let value = Decimal::from_str(trimmed)
            .map_err(|e| CoreError::Validation(format!("'{input}' is not a whole number: {e}")))?;
        Ok(Self::normalized(value))
    }

    /// The underlying decimal, as bound to `NUMERIC` columns.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn normalized(mut value: Decimal) -> Self {
        if value.is_zero() {
            return Self::ZERO;
        }
        value.rescale(0);
        Self(value)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

/// Applied to every `NUMERIC` value read back from the database.
impl TryFrom<Decimal> for Amount {
    type Error = CoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if !value.fract().is_zero() {
            return Err(CoreError::Internal(format!(
                "stored amount {value} has a fractional part"
            )));
        }
        Ok(Self::normalized(value))
    }
}

impl FromStr for Amount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_any(AmountVisitor { allow_blank: false })?
            .ok_or_else(|| de::Error::custom("amount must not be blank"))
    }
}

/// Deserialize an optional amount where `null`, a missing field, and a blank
/// string all mean "not provided".
///
/// Use together with `#[serde(default)]`.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalAmountVisitor)
}

struct OptionalAmountVisitor;

impl<'de> Visitor<'de> for OptionalAmountVisitor {
    type Value = Option<Amount>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a whole number as a string or integer, or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(AmountVisitor { allow_blank: true })
    }
}

struct AmountVisitor {
    allow_blank: bool,
}

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Option<Amount>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a whole number as a string or integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if self.allow_blank && v.trim().is_empty() {
            return Ok(None);
        }
        Amount::parse(v).map(Some).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(Amount::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(Amount(Decimal::from(v))))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Err(E::custom(format!(
            "{v} is not exact; send amounts as digit strings"
        )))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        if self.allow_blank {
            Ok(None)
        } else {
            Err(E::custom("amount must not be null"))
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "blank_as_none")]
        amount: Option<Amount>,
    }

    #[test]
    fn large_value_survives_json_round_trip() {
        let amount: Amount = serde_json::from_str("\"123456789012345678\"").unwrap();
        assert_eq!(
            serde_json::to_string(&amount).unwrap(),
            "\"123456789012345678\""
        );
    }

    #[test]
    fn integer_json_numbers_are_accepted() {
        let amount: Amount = serde_json::from_str("50000").unwrap();
        assert_eq!(amount.to_string(), "50000");
    }

    #[test]
    fn floats_and_fractions_are_rejected() {
        assert!(serde_json::from_str::<Amount>("12.5").is_err());
        assert_matches!(Amount::parse("12.5"), Err(CoreError::Validation(_)));
        assert_matches!(Amount::parse("1e3"), Err(CoreError::Validation(_)));
        assert_matches!(Amount::parse("abc"), Err(CoreError::Validation(_)));
        assert_matches!(Amount::parse(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn too_many_digits_is_rejected() {
        let long = "9".repeat(MAX_DIGITS + 1);
        assert_matches!(Amount::parse(&long), Err(CoreError::Validation(_)));
        assert!(Amount::parse(&"9".repeat(MAX_DIGITS)).is_ok());
    }

    #[test]
    fn leading_zeros_and_negative_values() {
        assert_eq!(Amount::parse("000120").unwrap().to_string(), "120");
        assert_eq!(Amount::parse("-75").unwrap().to_string(), "-75");
        assert_eq!(Amount::parse("-0").unwrap(), Amount::ZERO);
    }

    #[test]
    fn blank_null_and_missing_mean_not_provided() {
        let blank: Patch = serde_json::from_str(r#"{"amount": ""}"#).unwrap();
        let null: Patch = serde_json::from_str(r#"{"amount": null}"#).unwrap();
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert!(blank.amount.is_none());
        assert!(null.amount.is_none());
        assert!(missing.amount.is_none());
    }

    #[test]
    fn explicit_zero_is_kept() {
        let zero: Patch = serde_json::from_str(r#"{"amount": "0"}"#).unwrap();
        assert_eq!(zero.amount, Some(Amount::ZERO));
    }

    #[test]
    fn stored_decimal_with_fraction_is_refused() {
        let value = Decimal::new(1250, 2);
        assert_matches!(Amount::try_from(value), Err(CoreError::Internal(_)));
        let whole = Decimal::new(1200, 2);
        assert_eq!(Amount::try_from(whole).unwrap().to_string(), "12");
    }
}
