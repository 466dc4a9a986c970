//! Common error types used throughout smartlists.
//!
//! Loading a playlist document either succeeds completely or fails with
//! [`Error::MalformedDocument`]; the remaining variants cover the storage
//! and configuration layers.

/// Common error type for smartlists.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A serialized playlist document is structurally invalid.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A media type name could not be recognized.
    #[error("Unknown media type: {0}")]
    UnknownMediaType(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new MalformedDocument error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedDocument(msg.into())
    }

    /// Create a new Database error.
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Returns true if this error was caused by a malformed document.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDocument(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::malformed("missing type attribute");
        assert_eq!(err.to_string(), "Malformed document: missing type attribute");

        let err = Error::UnknownMediaType("podcasts".into());
        assert_eq!(err.to_string(), "Unknown media type: podcasts");

        let err = Error::database("connection failed");
        assert_eq!(err.to_string(), "Database error: connection failed");

        let err = Error::invalid_input("bad format");
        assert_eq!(err.to_string(), "Invalid input: bad format");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_is_malformed() {
        assert!(Error::malformed("x").is_malformed());
        assert!(!Error::database("x").is_malformed());
    }
}
