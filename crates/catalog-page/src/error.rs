use std::fmt;

/// Result type for catalog-page operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading page markup
#[derive(Debug)]
pub enum Error {
    /// Markup could not be parsed
    HtmlParse(String),

    /// Page has no element with the product list id
    MissingContainer(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::HtmlParse(msg) => write!(f, "HTML parse error: {}", msg),
            Error::MissingContainer(id) => {
                write!(f, "Page has no product list container (#{})", id)
            }
        }
    }
}

impl std::error::Error for Error {}
