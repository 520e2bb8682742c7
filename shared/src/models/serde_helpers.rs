//! Serde helpers for loosely-typed request bodies
//!
//! The admin front end sends biometric samples as whatever the capture
//! widget produced (usually a string, occasionally a number or object).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize any JSON value into `Option<String>`.
///
/// Strings are kept verbatim, `null`/missing becomes `None`, every other
/// value is coerced to its compact JSON text.
pub fn lossy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "lossy_string")]
        sample: Option<String>,
    }

    fn parse(json: &str) -> Option<String> {
        serde_json::from_str::<Holder>(json).unwrap().sample
    }

    #[test]
    fn test_string_kept_verbatim() {
        assert_eq!(parse(r#"{"sample":" fp-01 "}"#).as_deref(), Some(" fp-01 "));
    }

    #[test]
    fn test_null_and_missing() {
        assert_eq!(parse(r#"{"sample":null}"#), None);
        assert_eq!(parse("{}"), None);
    }

    #[test]
    fn test_non_string_coerced() {
        assert_eq!(parse(r#"{"sample":12345}"#).as_deref(), Some("12345"));
        assert_eq!(parse(r#"{"sample":[1,2]}"#).as_deref(), Some("[1,2]"));
    }
}
