use std::{fmt, str::FromStr};

use log::trace;

use crate::{Error, ErrorKind};

/// Checks that `raw` has the surface shape of an ISBN.
///
/// Hyphens are ignored, what remains must be 10 or 13 ASCII digits. The check digit is not
/// verified, so an ISBN-10 ending in `X` is rejected.
///
/// ```
/// assert!(bookseek::is_valid_format("978-0-123-45678-9"));
/// assert!(!bookseek::is_valid_format("978-012345678X"));
/// ```
#[must_use]
pub fn is_valid_format(raw: &str) -> bool {
    let digits = normalize(raw);
    matches!(digits.len(), 10 | 13) && digits.bytes().all(|b| b.is_ascii_digit())
}

fn normalize(raw: &str) -> String {
    raw.replace('-', "")
}

/// An ISBN that has passed [`is_valid_format`].
///
/// Keeps the string as entered by the user for messages alongside the normalized digits
/// used in requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Isbn {
    original: String,
    normalized: String,
}

impl Isbn {
    /// Validates `raw` and builds an [`Isbn`] from it.
    ///
    /// # Errors
    ///
    /// An [`Err`] of kind [`ErrorKind::InvalidFormat`] is returned when `raw` is not 10 or 13
    /// digits once hyphens are removed.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        if !is_valid_format(raw) {
            return Err(Error::new(
                ErrorKind::InvalidFormat,
                format!(
                    "Invalid ISBN format: '{raw}'. Please provide a 10 or 13 digit ISBN, hyphens are allowed."
                ),
            ));
        }

        let normalized = normalize(raw);
        trace!("ISBN '{raw}' normalized to '{normalized}'");
        Ok(Self {
            original: raw.to_owned(),
            normalized,
        })
    }

    /// The ISBN as it was entered.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The ISBN digits without hyphens.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl FromStr for Isbn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_and_thirteen_digits_are_valid() {
        assert!(is_valid_format("0123456789"));
        assert!(is_valid_format("9780123456789"));
    }

    #[test]
    fn hyphens_are_ignored() {
        assert!(is_valid_format("978-0-123-45678-9"));
        assert!(is_valid_format("0-123-45678-9"));
        assert!(is_valid_format("--0123456789--"));
    }

    #[test]
    fn wrong_lengths_are_invalid() {
        assert!(!is_valid_format(""));
        assert!(!is_valid_format("---"));
        assert!(!is_valid_format("123"));
        assert!(!is_valid_format("12345678901"));
        assert!(!is_valid_format("0123456789012345"));
    }

    #[test]
    fn non_digits_are_invalid() {
        assert!(!is_valid_format("978-012345678X"));
        assert!(!is_valid_format("abcdefghij"));
        assert!(!is_valid_format("978-A-123-45678-9"));
        assert!(!is_valid_format("0123 456789"));
        // non-ASCII digits are not decimal digits for an ISBN
        assert!(!is_valid_format("０１２３４５６７８９"));
    }

    #[test]
    fn parse_keeps_original_and_normalized() {
        let isbn: Isbn = "978-0-123-45678-9".parse().unwrap();

        assert_eq!("978-0-123-45678-9", isbn.original());
        assert_eq!("9780123456789", isbn.normalized());
        assert_eq!("978-0-123-45678-9", isbn.to_string());
    }

    #[test]
    fn parse_invalid_isbn_describes_the_input() {
        let err = Isbn::parse("invalid-isbn").unwrap_err();

        assert_eq!(ErrorKind::InvalidFormat, err.kind());
        assert!(err
            .to_string()
            .starts_with("Invalid ISBN format: 'invalid-isbn'"));
    }
}
