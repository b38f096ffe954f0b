//! Staff user key.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`StaffKey`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StaffKeyError {
    /// The input is empty after trimming.
    #[error("staff key cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("staff key must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input is not shaped like `local@domain`.
    #[error("staff key must be an email address")]
    NotAnEmail,
}

/// Key of a staff user record.
///
/// Staff user records are keyed by their email address, lower-cased, so the
/// same person always maps to the same record regardless of how they typed
/// their address at sign-in. Proposals store this key in `createdBy` and
/// `updatedBy`.
///
/// ## Examples
///
/// ```
/// use roofquote_core::StaffKey;
///
/// let key = StaffKey::parse("  Dana.Reyes@GetGlobalRoofing.com ").unwrap();
/// assert_eq!(key.as_str(), "dana.reyes@getglobalroofing.com");
///
/// assert!(StaffKey::parse("").is_err());
/// assert!(StaffKey::parse("dana").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct StaffKey(String);

impl StaffKey {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse and normalize a staff key.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than 254
    /// characters, or lacks a non-empty local part and domain around a
    /// single `@`.
    pub fn parse(s: &str) -> Result<Self, StaffKeyError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(StaffKeyError::Empty);
        }

        if trimmed.len() > Self::MAX_LENGTH {
            return Err(StaffKeyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_lowercase()))
            }
            _ => Err(StaffKeyError::NotAnEmail),
        }
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StaffKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for StaffKey {
    type Err = StaffKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StaffKey {
    type Error = StaffKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StaffKey> for String {
    fn from(key: StaffKey) -> Self {
        key.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let key = StaffKey::parse(" Sales@Example.COM\n").unwrap();
        assert_eq!(key.as_str(), "sales@example.com");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(StaffKey::parse("   "), Err(StaffKeyError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            StaffKey::parse(&long),
            Err(StaffKeyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_email() {
        assert_eq!(StaffKey::parse("sales"), Err(StaffKeyError::NotAnEmail));
        assert_eq!(StaffKey::parse("@example.com"), Err(StaffKeyError::NotAnEmail));
        assert_eq!(StaffKey::parse("sales@"), Err(StaffKeyError::NotAnEmail));
        assert_eq!(StaffKey::parse("a@b@c"), Err(StaffKeyError::NotAnEmail));
    }

    #[test]
    fn test_deserialize_normalizes() {
        let key: StaffKey = serde_json::from_str("\"Owner@Example.com\"").unwrap();
        assert_eq!(key.as_str(), "owner@example.com");
        assert!(serde_json::from_str::<StaffKey>("\"nobody\"").is_err());
    }
}
