// Headless catalog page
// The store owns the records; everything here is re-derived from it

mod error;
pub mod filter;
pub mod form;
mod html_page;
pub mod markup;
mod notify;
mod page;
pub mod render;

pub use error::{Error, Result};
pub use filter::{FilterSummary, FilterView};
pub use form::{FormController, FormField, FormFields, FormState, SubmitOutcome, ValidationPolicy};
pub use html_page::{HtmlPage, PRODUCT_LIST_ID};
pub use markup::{Element, parse_html};
pub use notify::{ConsoleNotifier, Notifier, RecordingNotifier};
pub use page::CatalogPage;
