use std::fmt;
use thiserror::Error;

/// The error type for urisign operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration error (missing secret, missing clock, invalid parameter names)
    ConfigInvalid,

    /// The url already carries a parameter reserved by the signer
    ParameterConflict,

    /// The url is correctly signed but its expiry timestamp has passed
    UrlExpired {
        /// Unix timestamp (seconds) the url expired at.
        expires_at: i64,
        /// Unix timestamp (seconds) at the time of the check.
        now: i64,
    },

    /// The url carries no hash parameter
    Unsigned,

    /// The hash parameter does not match the url
    SignatureMismatch,

    /// Url cannot be signed (malformed components, etc.)
    RequestInvalid,

    /// Unexpected errors
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error means the url failed verification.
    ///
    /// Configuration and conflict errors are caller bugs, not verification failures.
    pub fn is_verification_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UrlExpired { .. } | ErrorKind::Unsigned | ErrorKind::SignatureMismatch
        )
    }

    /// Returns `(expires_at, now)` if this is an expiry error.
    pub fn expiry(&self) -> Option<(i64, i64)> {
        match self.kind {
            ErrorKind::UrlExpired { expires_at, now } => Some((expires_at, now)),
            _ => None,
        }
    }
}

// Convenience constructors
impl Error {
    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a missing clock error
    pub fn missing_clock() -> Self {
        Self::config_invalid("missing clock component")
    }

    /// Create a parameter conflict error
    pub fn parameter_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParameterConflict, message)
    }

    /// Create an url expired error
    pub fn url_expired(expires_at: i64, now: i64) -> Self {
        Self::new(
            ErrorKind::UrlExpired { expires_at, now },
            format!("url expired at {expires_at}, current time is {now}"),
        )
    }

    /// Create an unsigned error
    pub fn unsigned(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsigned, message)
    }

    /// Create a signature mismatch error
    pub fn signature_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SignatureMismatch, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::ParameterConflict => write!(f, "reserved parameter conflict"),
            ErrorKind::UrlExpired { .. } => write!(f, "expired url"),
            ErrorKind::Unsigned => write!(f, "unsigned url"),
            ErrorKind::SignatureMismatch => write!(f, "signature mismatch"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}
