use std::fmt;

/// Result type for chatlens-jobs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the jobs layer
#[derive(Debug)]
pub enum Error {
    /// Transport-level failure (connect, timeout, body decode)
    Http(reqwest::Error),

    /// Server answered with a non-success status
    Api { status: u16, message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(err) => write!(f, "HTTP error: {}", err),
            Error::Api { status, message } => write!(f, "API error ({}): {}", status, message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(err) => Some(err),
            Error::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}
