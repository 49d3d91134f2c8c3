pub mod codec;
pub mod error;
pub mod id;
pub mod record;

pub use codec::{decode_catalog, encode_catalog};
pub use error::{Error, Result};
pub use id::{Clock, FixedClock, ID_PREFIX, IdGenerator, SystemClock};
pub use record::{PLACEHOLDER_IMAGE_URL, ProductRecord, RecordId};
