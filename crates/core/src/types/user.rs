//! Shopper identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UserId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// The input is empty or only whitespace.
    #[error("user id cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("user id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains control characters.
    #[error("user id must not contain control characters")]
    ControlCharacter,
}

/// A shopper identifier as supplied by the client.
///
/// The storefront has no login: the shell application generates an id and
/// sends it with every request. The value is therefore untrusted and only
/// used to partition in-memory state.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed
/// - Length: 1-128 characters after trimming
/// - No control characters
///
/// ## Examples
///
/// ```
/// use microshop_core::UserId;
///
/// assert_eq!(UserId::parse("  user-42 ").unwrap().as_str(), "user-42");
/// assert!(UserId::parse("").is_err());
/// assert!(UserId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Maximum length of a user id.
    pub const MAX_LENGTH: usize = 128;

    /// Parse a `UserId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`] characters, or contains control characters.
    pub fn parse(s: &str) -> Result<Self, UserIdError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(UserIdError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(UserIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UserIdError::ControlCharacter);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(UserId::parse("user123").is_ok());
        assert!(UserId::parse("a").is_ok());
        assert!(UserId::parse("4f1c2a9e-0000-4000-8000-000000000000").is_ok());
    }

    #[test]
    fn test_parse_trims() {
        let id = UserId::parse("\tuser123  ").unwrap();
        assert_eq!(id.as_str(), "user123");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(UserId::parse(""), Err(UserIdError::Empty));
        assert_eq!(UserId::parse("   "), Err(UserIdError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "u".repeat(UserId::MAX_LENGTH + 1);
        assert!(matches!(
            UserId::parse(&long),
            Err(UserIdError::TooLong { .. })
        ));
        assert!(UserId::parse(&"u".repeat(UserId::MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_parse_control_character() {
        assert_eq!(
            UserId::parse("user\u{0}id"),
            Err(UserIdError::ControlCharacter)
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = UserId::parse("user123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"user123\"");

        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<UserId>("\"  \"").is_err());
    }
}
