//! Validated email address carried by user payloads.

use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email must contain exactly one @ symbol")]
    AtSymbol,
    #[error("email cannot contain whitespace")]
    Whitespace,
    #[error("email needs a name before and a domain after the @")]
    MissingPart,
}

/// An email address as the backend stores it.
///
/// Payloads deserialize through [`Email::parse`], so a user record with a
/// malformed address fails schema validation at its `email` path.
///
/// ```
/// use edumall_core::Email;
///
/// assert!(Email::parse("lan@edumall.vn").is_ok());
/// assert!(Email::parse("lan@").is_err());
/// assert!(Email::parse("lan@@edumall.vn").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// RFC 5321 limit.
    pub const MAX_LENGTH: usize = 254;

    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, contains whitespace,
    /// or is not `name@domain` with exactly one `@`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        Self::check(s)?;
        Ok(Self(s.to_owned()))
    }

    fn check(s: &str) -> Result<(), EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }
        match s.split_once('@') {
            Some((_, domain)) if domain.contains('@') => Err(EmailError::AtSymbol),
            Some((name, domain)) if !name.is_empty() && !domain.is_empty() => Ok(()),
            Some(_) => Err(EmailError::MissingPart),
            None => Err(EmailError::AtSymbol),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::check(&value)?;
        Ok(Self(value))
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
