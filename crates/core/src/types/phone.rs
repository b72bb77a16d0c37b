//! Phone number type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Accepted phone formats: an optional `+` country code followed by a
/// ten-digit subscriber number, with optional `-` or space separators
/// between the groups.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+\d{0,3}[- ]?)?\d{3}[- ]?\d{3}[- ]?\d{4}$").expect("valid phone pattern")
});

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input does not match any accepted format.
    #[error("Invalid phone number format. Use +1234567890 or 123-456-7890")]
    InvalidFormat,
}

/// A phone number in one of the accepted formats.
///
/// ## Examples
///
/// ```
/// use storegraph_core::Phone;
///
/// assert!(Phone::parse("+1234567890").is_ok());
/// assert!(Phone::parse("123-456-7890").is_ok());
/// assert!(Phone::parse("123-45-6789").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::InvalidFormat`] if the input does not match
    /// an accepted format.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if PHONE_PATTERN.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PhoneError::InvalidFormat)
        }
    }

    /// Wrap a string without validating the format.
    ///
    /// Used when loading rows that predate format validation; database
    /// values are passed through as-is.
    #[must_use]
    pub fn from_db_value(s: String) -> Self {
        Self(s)
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Phone {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Phone {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::from_db_value(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Phone {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plus_prefixed() {
        assert!(Phone::parse("+1234567890").is_ok());
        assert!(Phone::parse("+1 234-567-8900").is_ok());
        assert!(Phone::parse("+12 345 678 9012").is_ok());
    }

    #[test]
    fn test_parse_dashed() {
        assert!(Phone::parse("123-456-7890").is_ok());
        assert!(Phone::parse("123 456 7890").is_ok());
        assert!(Phone::parse("1234567890").is_ok());
    }

    #[test]
    fn test_parse_wrong_grouping() {
        assert!(Phone::parse("123-45-6789").is_err());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Phone::parse("").is_err());
        assert!(Phone::parse("+").is_err());
        assert!(Phone::parse("12345").is_err());
        assert!(Phone::parse("abc-def-ghij").is_err());
        assert!(Phone::parse("123-456-78901").is_err());
    }

    #[test]
    fn test_error_message() {
        let err = Phone::parse("12345").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid phone number format. Use +1234567890 or 123-456-7890"
        );
    }

    #[test]
    fn test_from_db_value_skips_validation() {
        // Legacy rows may hold values the current pattern rejects
        let phone = Phone::from_db_value("(555) 0100".to_owned());
        assert_eq!(phone.as_str(), "(555) 0100");
    }

    #[test]
    fn test_display() {
        let phone = Phone::parse("123-456-7890").unwrap();
        assert_eq!(format!("{phone}"), "123-456-7890");
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("+1234567890").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+1234567890\"");

        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
