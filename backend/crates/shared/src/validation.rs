//! Field Presence Validation
//!
//! Request payloads arrive untyped. Each domain declares an ordered list of
//! required keys; [`require_fields`] copies exactly those keys into a new
//! [`ValidInput`] and drops everything else.
//!
//! Presence is key existence: `""`, `0`, `false` and `null` all pass.

use serde_json::{Map, Value};

use crate::error::app_error::{AppError, AppResult};

/// Fields required by [`validate_id`]
pub const ID_FIELDS: &[&str] = &["id"];

/// Allow-listed copy of a request payload
#[derive(Debug, Clone, PartialEq)]
pub struct ValidInput(Map<String, Value>);

impl ValidInput {
    /// Raw value of a validated field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Field rendered as text
    ///
    /// Strings are returned verbatim; any other JSON value is rendered in its
    /// JSON form, so `1234` and `"1234"` yield the same text.
    pub fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Field as a signed integer
    ///
    /// Accepts a JSON integer or a string holding one.
    pub fn integer(&self, key: &str) -> AppResult<i64> {
        let invalid = || AppError::bad_request(format!("{} must be an integer", key));
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_i64().ok_or_else(invalid),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| invalid().with_source(e)),
            _ => Err(invalid()),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidInput> for Value {
    fn from(input: ValidInput) -> Self {
        Value::Object(input.0)
    }
}

/// Copy the `fields` of `body` into a new mapping
///
/// ## Errors
/// `400 Bad Request` with message `"<field> missing"` for the first field, in
/// list order, that `body` does not contain. A body that is not a JSON object
/// has no fields.
///
/// ## Examples
/// ```rust
/// use kernel::validation::require_fields;
/// use serde_json::json;
///
/// let body = json!({"id": 3, "extra": true});
/// let valid = require_fields(&body, &["id"]).unwrap();
/// assert_eq!(valid.len(), 1);
///
/// let err = require_fields(&body, &["id", "name"]).unwrap_err();
/// assert_eq!(err.message(), "name missing");
/// ```
pub fn require_fields(body: &Value, fields: &[&str]) -> AppResult<ValidInput> {
    let object = body.as_object();
    let mut picked = Map::with_capacity(fields.len());

    for &field in fields {
        match object.and_then(|o| o.get(field)) {
            Some(value) => {
                picked.insert(field.to_string(), value.clone());
            }
            None => {
                tracing::debug!(field, "Required field missing");
                return Err(AppError::bad_request(format!("{} missing", field)));
            }
        }
    }

    Ok(ValidInput(picked))
}

/// Validate a lookup-by-id payload
pub fn validate_id(body: &Value) -> AppResult<ValidInput> {
    require_fields(body, ID_FIELDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_extra_fields_are_dropped() {
        let body = json!({"a": 1, "b": "two", "c": [3]});
        let valid = require_fields(&body, &["a", "b"]).unwrap();

        assert_eq!(Value::from(valid), json!({"a": 1, "b": "two"}));
    }

    #[test]
    fn test_first_missing_field_in_list_order_is_reported() {
        let body = json!({"b": 1});
        let err = require_fields(&body, &["a", "b", "c"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.message(), "a missing");

        let err = require_fields(&json!({"a": 1}), &["a", "c", "b"]).unwrap_err();
        assert_eq!(err.message(), "c missing");
    }

    #[test]
    fn test_falsy_values_count_as_present() {
        let body = json!({"a": "", "b": 0, "c": false, "d": null});
        let valid = require_fields(&body, &["a", "b", "c", "d"]).unwrap();

        assert_eq!(valid.len(), 4);
        assert_eq!(valid.get("d"), Some(&Value::Null));
    }

    #[test]
    fn test_non_object_body_has_no_fields() {
        let err = require_fields(&json!([1, 2]), &["id"]).unwrap_err();
        assert_eq!(err.message(), "id missing");

        let err = require_fields(&Value::Null, &["id"]).unwrap_err();
        assert_eq!(err.message(), "id missing");
    }

    #[test]
    fn test_empty_field_list_yields_empty_input() {
        let valid = require_fields(&json!({"x": 1}), &[]).unwrap();
        assert!(valid.is_empty());
    }

    #[test]
    fn test_text_renders_non_strings() {
        let valid = require_fields(&json!({"s": "abc", "n": 1234, "b": true}), &["s", "n", "b"])
            .unwrap();

        assert_eq!(valid.text("s"), "abc");
        assert_eq!(valid.text("n"), "1234");
        assert_eq!(valid.text("b"), "true");
    }

    #[test]
    fn test_integer_accepts_numbers_and_numeric_strings() {
        let valid = require_fields(&json!({"a": 7, "b": " 12 ", "c": "x", "d": 1.5}), &[
            "a", "b", "c", "d",
        ])
        .unwrap();

        assert_eq!(valid.integer("a").unwrap(), 7);
        assert_eq!(valid.integer("b").unwrap(), 12);
        assert_eq!(valid.integer("c").unwrap_err().message(), "c must be an integer");
        assert_eq!(valid.integer("d").unwrap_err().status_code(), 400);
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id(&json!({"id": 1})).is_ok());
        assert_eq!(validate_id(&json!({})).unwrap_err().message(), "id missing");
    }
}
