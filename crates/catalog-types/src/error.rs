use std::fmt;

/// Result type for catalog-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while encoding or decoding the catalog document
#[derive(Debug)]
pub enum Error {
    /// Document is not valid JSON, or an element is not a record object
    Json(serde_json::Error),

    /// Document is valid JSON but the top level is not an array
    NotAnArray(&'static str),

    /// Document is empty or whitespace only
    Empty,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Json(err) => write!(f, "Invalid catalog document: {}", err),
            Error::NotAnArray(kind) => {
                write!(f, "Catalog document must be an array, found {}", kind)
            }
            Error::Empty => write!(f, "Catalog document is empty"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::NotAnArray(_) | Error::Empty => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
