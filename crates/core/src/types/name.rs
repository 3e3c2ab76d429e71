//! Person name type for user first and last names.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Letters (any script), ASCII spaces and hyphens.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L} -]+$").expect("Invalid regex"));

/// Errors that can occur when parsing a [`PersonName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PersonNameError {
    /// The input is empty or whitespace only.
    #[error("name cannot be blank")]
    Blank,
    /// The input is longer than [`PersonName::MAX_LENGTH`].
    #[error("name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains characters other than letters, spaces and hyphens.
    #[error("name may only contain letters, spaces and hyphens")]
    InvalidFormat,
}

/// A first or last name.
///
/// ```
/// use hotel_booking_core::PersonName;
///
/// assert!(PersonName::parse("Anna-Maria").is_ok());
/// assert!(PersonName::parse("Олена").is_ok());
/// assert!(PersonName::parse("John#").is_err());
/// assert!(PersonName::parse("R2D2").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Maximum length, in characters.
    pub const MAX_LENGTH: usize = 150;

    /// Parse a name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is blank, too long, or contains
    /// anything other than letters, spaces and hyphens.
    pub fn parse(s: &str) -> Result<Self, PersonNameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(PersonNameError::Blank);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !NAME_RE.is_match(trimmed) {
            return Err(PersonNameError::InvalidFormat);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_letters_spaces_hyphens() {
        assert!(PersonName::parse("John").is_ok());
        assert!(PersonName::parse("Mary Ann").is_ok());
        assert!(PersonName::parse("Jean-Luc").is_ok());
        assert!(PersonName::parse("Іван").is_ok());
    }

    #[test]
    fn test_rejects_digits_and_symbols() {
        assert_eq!(PersonName::parse("John#"), Err(PersonNameError::InvalidFormat));
        assert_eq!(PersonName::parse("John3"), Err(PersonNameError::InvalidFormat));
        assert_eq!(PersonName::parse("O'Brien"), Err(PersonNameError::InvalidFormat));
    }

    #[test]
    fn test_rejects_control_whitespace() {
        assert_eq!(PersonName::parse("John\tDoe"), Err(PersonNameError::InvalidFormat));
        assert_eq!(PersonName::parse("John\nDoe"), Err(PersonNameError::InvalidFormat));
        assert_eq!(PersonName::parse("John\rDoe"), Err(PersonNameError::InvalidFormat));
        assert_eq!(
            PersonName::parse("John\u{00A0}Doe"),
            Err(PersonNameError::InvalidFormat)
        );
    }

    #[test]
    fn test_blank_and_trimming() {
        assert_eq!(PersonName::parse("   "), Err(PersonNameError::Blank));
        assert_eq!(
            PersonName::parse("  Doe ").as_ref().map(PersonName::as_str),
            Ok("Doe")
        );
    }

    #[test]
    fn test_too_long() {
        let long = "a".repeat(PersonName::MAX_LENGTH + 1);
        assert!(matches!(
            PersonName::parse(&long),
            Err(PersonNameError::TooLong { .. })
        ));
    }
}
