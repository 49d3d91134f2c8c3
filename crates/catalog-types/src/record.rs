use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Image shown for records that carry no image URL.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400x240?text=No+Image";

/// Record identifier (`book-<unix millis>` for generated ids)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One product in the catalog.
///
/// Serialized with the short field names of the persisted document
/// (`id`, `name`, `desc`, `price`, `img`). Deserialization is lenient:
/// missing fields and `null` become empty strings and scalar values are
/// kept in their textual form, so a hand-edited mirror still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "desc", default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Stored verbatim, never parsed as a number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(rename = "img", default, deserialize_with = "lenient_string")]
    pub image_url: String,
}

impl ProductRecord {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price: String::new(),
            image_url: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Image source to display, falling back to [`PLACEHOLDER_IMAGE_URL`]
    pub fn image_src(&self) -> &str {
        if self.image_url.trim().is_empty() {
            PLACEHOLDER_IMAGE_URL
        } else {
            &self.image_url
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) => Err(D::Error::custom("expected a string, found an array")),
        Value::Object(_) => Err(D::Error::custom("expected a string, found an object")),
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer).map(RecordId::from)
}
