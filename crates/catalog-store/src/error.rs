use std::fmt;

/// Result type for catalog-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the storage layer
#[derive(Debug)]
pub enum Error {
    /// IO operation on a file mirror failed
    Io(std::io::Error),

    /// SQLite mirror operation failed
    Database(rusqlite::Error),

    /// Catalog document could not be encoded or decoded
    Document(catalog_types::Error),

    /// Write would exceed the mirror's byte quota
    QuotaExceeded { limit: usize, required: usize },

    /// Mirror refuses access (disabled, read-only, ...)
    Unavailable(String),

    /// Key cannot be used with this mirror
    InvalidKey(String),

    /// Database was written by a schema this build does not know
    SchemaVersion { found: i32, expected: i32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Database(err) => {
                let msg = err.to_string();
                if msg.contains("no such table") {
                    write!(
                        f,
                        "Database schema mismatch: {}. Reopen the mirror to re-create it.",
                        msg
                    )
                } else {
                    write!(f, "Database error: {}", err)
                }
            }
            Error::Document(err) => write!(f, "Document error: {}", err),
            Error::QuotaExceeded { limit, required } => write!(
                f,
                "Storage quota exceeded: {} bytes required, limit is {} bytes",
                required, limit
            ),
            Error::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            Error::InvalidKey(key) => write!(f, "Invalid storage key: '{}'", key),
            Error::SchemaVersion { found, expected } => write!(
                f,
                "Unsupported database schema version {} (expected {}); stored data was left untouched",
                found, expected
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Database(err) => Some(err),
            Error::Document(err) => Some(err),
            Error::QuotaExceeded { .. }
            | Error::Unavailable(_)
            | Error::InvalidKey(_)
            | Error::SchemaVersion { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<catalog_types::Error> for Error {
    fn from(err: catalog_types::Error) -> Self {
        Error::Document(err)
    }
}
