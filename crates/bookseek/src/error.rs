pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// The Errors that may occur when looking up a book.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<DynError>,
}

/// Types of errors that make up an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The ISBN does not have the shape of a 10 or 13 digit ISBN.
    InvalidFormat,
    /// The API could not be reached or the connection failed mid request.
    Connectivity,
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The API responded with a 404 status.
    NotFound,
    /// The API responded with an error status other than 404.
    HttpStatus(u16),
    /// The API responded successfully but with an empty body.
    EmptyResponse,
    /// The response body could not be decoded.
    Deserialize,
    /// The decoded response says there is no book for the ISBN.
    LogicalNotFound,
}

impl Error {
    /// Creates a new [`Error`] based on the [`ErrorKind`] and message to describe the error.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Wraps an existing error as the source of [`Error`].
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<DynError>,
    {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Replaces the message used to describe the error, the source is kept.
    #[must_use]
    pub fn context<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the kind of error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat => f.write_str("Invalid format"),
            Self::Connectivity => f.write_str("Connectivity error"),
            Self::Timeout => f.write_str("Timeout"),
            Self::NotFound => f.write_str("Not found"),
            Self::HttpStatus(code) => write!(f, "HTTP status {code}"),
            Self::EmptyResponse => f.write_str("Empty response"),
            Self::Deserialize => f.write_str("Deserialize error"),
            Self::LogicalNotFound => f.write_str("No data"),
        }
    }
}

impl std::fmt::Display for Error {
    // The message is a complete sentence when present, so the kind is only written as a
    // fallback description.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.message, &self.source) {
            (Some(message), _) => f.write_str(message),
            (None, Some(cause)) => write!(f, "{}: caused by {cause}", self.kind),
            (None, None) => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_takes_precedence_over_kind() {
        let err = Error::new(ErrorKind::NotFound, "ISBN 0000000000 not found (404 error).");
        assert_eq!("ISBN 0000000000 not found (404 error).", err.to_string());
    }

    #[test]
    fn wrapped_error_without_message_shows_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
        let err = Error::wrap(ErrorKind::Connectivity, cause);

        assert_eq!("Connectivity error: caused by socket closed", err.to_string());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn context_keeps_source_and_kind() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "bad");
        let err = Error::wrap(ErrorKind::HttpStatus(503), cause).context("API request failed");

        assert_eq!(ErrorKind::HttpStatus(503), err.kind());
        assert_eq!("API request failed", err.to_string());
        assert!(std::error::Error::source(&err).is_some());
    }
}
