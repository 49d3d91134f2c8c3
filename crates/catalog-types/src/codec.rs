use crate::{Error, ProductRecord, Result};
use serde_json::Value;

/// Encode the catalog as the persisted JSON array document
pub fn encode_catalog(records: &[ProductRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Decode a persisted catalog document.
///
/// Only a top-level JSON array of record objects is accepted; an empty
/// document, invalid JSON or any other top-level value is an error so
/// callers can tell "no usable data" apart from "an empty catalog" (`[]`).
pub fn decode_catalog(raw: &str) -> Result<Vec<ProductRecord>> {
    if raw.trim().is_empty() {
        return Err(Error::Empty);
    }

    match serde_json::from_str::<Value>(raw)? {
        value @ Value::Array(_) => Ok(serde_json::from_value(value)?),
        other => Err(Error::NotAnArray(value_kind(&other))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_encoded_catalog() {
        let records = vec![
            ProductRecord::new("book-2", "Sách B").with_price("50000"),
            ProductRecord::new("book-1", "Sách A")
                .with_description("Tiểu thuyết")
                .with_price("100000")
                .with_image_url("a.png"),
        ];

        let raw = encode_catalog(&records).unwrap();
        assert!(raw.starts_with('['));
        assert_eq!(decode_catalog(&raw).unwrap(), records);
    }

    #[test]
    fn test_decode_empty_array_is_empty_catalog() {
        assert!(decode_catalog("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        match decode_catalog(r#""not an array""#) {
            Err(Error::NotAnArray(kind)) => assert_eq!(kind, "string"),
            other => panic!("expected NotAnArray, got {:?}", other),
        }
        assert!(matches!(
            decode_catalog(r#"{"products": []}"#),
            Err(Error::NotAnArray("object"))
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_json_and_blank() {
        assert!(matches!(decode_catalog("not an array"), Err(Error::Json(_))));
        assert!(matches!(decode_catalog("   "), Err(Error::Empty)));
    }

    #[test]
    fn test_decode_rejects_array_of_scalars() {
        assert!(matches!(decode_catalog("[1, 2]"), Err(Error::Json(_))));
    }
}
