//! JSON utility functions shared across crates.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Overlays `patch` onto `existing` key by key.
///
/// Keys present in `patch` replace the existing value, keys it omits keep the
/// local value. A non-object `patch` replaces nothing.
///
/// # Errors
/// Returns an error if `existing` cannot be serialized or the merged object no
/// longer deserializes into `T`.
pub fn merge_record<T>(existing: &T, patch: Value) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let mut base = serde_json::to_value(existing)?;
    if let (Value::Object(base_map), Value::Object(patch_map)) = (&mut base, patch) {
        for (key, value) in patch_map {
            base_map.insert(key, value);
        }
    }
    serde_json::from_value(base)
}

/// Pulls a human-readable message out of an API error body.
///
/// Looks at `message` then `error`; falls back to the trimmed raw body.
#[must_use]
pub fn error_message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        for key in ["message", "error"] {
            if let Some(Value::String(msg)) = map.get(key) {
                if !msg.is_empty() {
                    return Some(msg.clone());
                }
            }
        }
        return None;
    }
    Some(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Person {
        name: String,
        email: String,
        #[serde(default)]
        age: Option<u32>,
    }

    #[test]
    fn test_merge_overwrites_present_keys_only() {
        let existing = Person { name: "Ann".to_owned(), email: "a@x.io".to_owned(), age: Some(40) };
        let merged = merge_record(&existing, serde_json::json!({"name": "Anna"})).unwrap();
        assert_eq!(merged, Person { name: "Anna".to_owned(), email: "a@x.io".to_owned(), age: Some(40) });
    }

    #[test]
    fn test_merge_ignores_unknown_keys() {
        let existing = Person { name: "Ann".to_owned(), email: "a@x.io".to_owned(), age: None };
        let merged = merge_record(&existing, serde_json::json!({"password": "x"})).unwrap();
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_merge_non_object_patch_is_noop() {
        let existing = Person { name: "Ann".to_owned(), email: "a@x.io".to_owned(), age: None };
        let merged = merge_record(&existing, Value::Null).unwrap();
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_error_message_from_json_body() {
        let body = r#"{"status":409,"code":4010,"message":"Email a@x.io already exists"}"#;
        assert_eq!(error_message_from_body(body).as_deref(), Some("Email a@x.io already exists"));
    }

    #[test]
    fn test_error_message_from_plain_body() {
        assert_eq!(error_message_from_body("File not found\n").as_deref(), Some("File not found"));
        assert_eq!(error_message_from_body("   "), None);
    }
}
