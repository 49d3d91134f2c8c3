// Catalog store
// Owns the product list; the mirror only ever sees whole-list overwrites

mod error;
mod file;
mod mirror;
pub mod seed;
mod sqlite;
mod store;

// Public API
pub use error::{Error, Result};
pub use file::FileMirror;
pub use mirror::{MemoryMirror, Mirror};
pub use seed::{MarkupItem, MarkupParagraph, MarkupSource, NoMarkup};
pub use sqlite::SqliteMirror;
pub use store::{CatalogStore, DEFAULT_KEY, LoadOutcome, PersistOutcome};
