//! Best-effort recovery of typed values from query string text.
//!
//! Query string values are plain text once percent-decoded. Values that were
//! written as JSON (`true`, `42`, `{"a":1}`) are recovered as typed JSON values,
//! while anything else (`users.json`, `hello world`) is kept as a string.

use std::borrow::Cow;

use serde_json::Value;

/// Outcome of coercing a decoded query string value.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
	/// The text was strict JSON and parsed into a typed value.
	ParsedAsJson(Value),
	/// The text was not JSON and is kept verbatim.
	KeptAsString(String),
}

impl CoercedValue {
	/// Converts the outcome into a JSON value, wrapping kept strings.
	pub fn into_value(self) -> Value {
		match self {
			Self::ParsedAsJson(value) => value,
			Self::KeptAsString(text) => Value::String(text),
		}
	}

	/// Returns `true` if the text parsed as JSON.
	pub fn is_json(&self) -> bool {
		matches!(self, Self::ParsedAsJson(_))
	}
}

/// Attempts a strict JSON parse of `text`, keeping the original text on failure.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use wayline_query::{CoercedValue, coerce_value};
///
/// assert_eq!(coerce_value("42"), CoercedValue::ParsedAsJson(json!(42)));
/// assert_eq!(
/// 	coerce_value("users.json"),
/// 	CoercedValue::KeptAsString("users.json".to_string())
/// );
/// ```
pub fn coerce_value(text: &str) -> CoercedValue {
	match serde_json::from_str::<Value>(text) {
		Ok(value) => CoercedValue::ParsedAsJson(value),
		Err(_) => CoercedValue::KeptAsString(text.to_string()),
	}
}

/// Textual form a value takes inside a query string, before percent-encoding.
///
/// Strings are written as-is, numbers and booleans by their literal form, and
/// `null`, objects and arrays as JSON.
pub(crate) fn value_text(value: &Value) -> Cow<'_, str> {
	match value {
		Value::String(text) => Cow::Borrowed(text.as_str()),
		Value::Bool(flag) => Cow::Owned(flag.to_string()),
		Value::Number(number) => Cow::Owned(number.to_string()),
		Value::Null | Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("true", json!(true))]
	#[case("false", json!(false))]
	#[case("42", json!(42))]
	#[case("-1.5", json!(-1.5))]
	#[case("null", json!(null))]
	#[case(r#"{"a":1}"#, json!({"a": 1}))]
	#[case("[1,2,3]", json!([1, 2, 3]))]
	#[case(r#""quoted""#, json!("quoted"))]
	fn test_coerce_json_text(#[case] text: &str, #[case] expected: Value) {
		assert_eq!(coerce_value(text), CoercedValue::ParsedAsJson(expected));
	}

	#[rstest]
	#[case("users.json")]
	#[case("hello world")]
	#[case("")]
	#[case("{not json}")]
	#[case("True")]
	fn test_coerce_keeps_plain_text(#[case] text: &str) {
		let coerced = coerce_value(text);
		assert!(!coerced.is_json());
		assert_eq!(coerced.into_value(), Value::String(text.to_string()));
	}

	#[rstest]
	#[case(json!("users.json"), "users.json")]
	#[case(json!(true), "true")]
	#[case(json!(7), "7")]
	#[case(json!(null), "null")]
	#[case(json!({"dataUrl": "users.json"}), r#"{"dataUrl":"users.json"}"#)]
	#[case(json!([1, "a"]), r#"[1,"a"]"#)]
	fn test_value_text(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(value_text(&value), expected);
	}
}
