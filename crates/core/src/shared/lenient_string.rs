use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Deserializes a JSON scalar as a string.
///
/// Transcript tables are not strict about column types: speakers may be
/// stored as integers and edited text may be missing. Numbers and booleans
/// are rendered with `to_string`, `null` becomes an empty string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientStringVisitor)
}

struct LenientStringVisitor;

impl<'de> Visitor<'de> for LenientStringVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::deserialize")]
        value: String,
    }

    fn parse(json: &str) -> String {
        serde_json::from_str::<Row>(json).unwrap().value
    }

    #[test]
    fn test_string_passes_through() {
        assert_eq!(parse(r#"{"value": "안녕"}"#), "안녕");
    }

    #[test]
    fn test_integer_is_stringified() {
        assert_eq!(parse(r#"{"value": 3}"#), "3");
    }

    #[test]
    fn test_bool_is_stringified() {
        assert_eq!(parse(r#"{"value": true}"#), "true");
    }

    #[test]
    fn test_null_becomes_empty() {
        assert_eq!(parse(r#"{"value": null}"#), "");
    }

    #[test]
    fn test_array_is_rejected() {
        assert!(serde_json::from_str::<Row>(r#"{"value": [1]}"#).is_err());
    }
}
