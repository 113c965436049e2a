//! WhatsApp contact number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`WhatsAppNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WhatsAppNumberError {
    /// The input string is empty.
    #[error("whatsapp number cannot be empty")]
    Empty,
    /// The input contains something other than digits and separators.
    #[error("whatsapp number may only contain digits, spaces, dashes and a leading +")]
    InvalidCharacter,
    /// Too few or too many digits for an international number.
    #[error("whatsapp number must have between {min} and {max} digits")]
    InvalidLength {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count (E.164).
        max: usize,
    },
}

/// An international phone number in the digits-only form `wa.me` expects.
///
/// Input may carry a leading `+`, spaces, and dashes; they are stripped.
///
/// ## Examples
///
/// ```
/// use tomtech_core::WhatsAppNumber;
///
/// let number = WhatsAppNumber::parse("+254 702-466-009").unwrap();
/// assert_eq!(number.as_str(), "254702466009");
///
/// assert!(WhatsAppNumber::parse("").is_err());
/// assert!(WhatsAppNumber::parse("call me").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct WhatsAppNumber(String);

impl WhatsAppNumber {
    /// Minimum digits accepted.
    pub const MIN_DIGITS: usize = 7;
    /// Maximum digits in an E.164 number.
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `WhatsAppNumber` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains letters or other
    /// symbols, or has a digit count outside 7..=15.
    pub fn parse(s: &str) -> Result<Self, WhatsAppNumberError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(WhatsAppNumberError::Empty);
        }

        let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let mut digits = String::with_capacity(body.len());
        for c in body.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' => {}
                _ => return Err(WhatsAppNumberError::InvalidCharacter),
            }
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(WhatsAppNumberError::InvalidLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(digits))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the number and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for WhatsAppNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for WhatsAppNumber {
    type Err = WhatsAppNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WhatsAppNumber {
    type Error = WhatsAppNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WhatsAppNumber> for String {
    fn from(number: WhatsAppNumber) -> Self {
        number.0
    }
}

impl AsRef<str> for WhatsAppNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
