//! Flat query string layer.
//!
//! Maps a location's query string to a flat [`Props`] mapping and back. Every
//! value goes through [`coerce_value`] on the way in and is written in its
//! textual form on the way out, so typed values survive a round trip.

use std::borrow::Cow;

use serde::Serialize;

use crate::Props;
use crate::coerce::{coerce_value, value_text};

/// Returns the query portion of `location`: the text after the first `?`,
/// without any `#fragment`. Empty when the location has no `?`.
///
/// ```
/// use wayline_query::query_string;
///
/// assert_eq!(query_string("mypage.com?a=1&b=2#top"), "a=1&b=2");
/// assert_eq!(query_string("mypage.com"), "");
/// ```
pub fn query_string(location: &str) -> &str {
	let Some((_, rest)) = location.split_once('?') else {
		return "";
	};
	match rest.split_once('#') {
		Some((query, _fragment)) => query,
		None => rest,
	}
}

/// Splits the query of `location` into `(key, decoded value)` pairs, in order.
///
/// Empty segments are skipped. A segment without `=` yields an empty value.
pub(crate) fn decoded_pairs(location: &str) -> impl Iterator<Item = (&str, Cow<'_, str>)> {
	query_string(location)
		.split('&')
		.filter(|segment| !segment.is_empty())
		.map(|segment| {
			let (key, raw) = segment.split_once('=').unwrap_or((segment, ""));
			(key, decode_component(raw))
		})
}

fn decode_component(raw: &str) -> Cow<'_, str> {
	match urlencoding::decode(raw) {
		Ok(decoded) => decoded,
		Err(err) => {
			tracing::debug!(value = raw, error = %err, "keeping undecodable query value as-is");
			Cow::Borrowed(raw)
		}
	}
}

/// Parses the query of `location` into a flat props mapping.
///
/// Keys are taken verbatim and inserted in order of appearance; when a key
/// repeats, it keeps its first position and the last value wins. Values are
/// percent-decoded and then coerced, so `count=3` yields the number `3` while
/// `dataUrl=users.json` yields a string.
///
/// ```
/// use serde_json::json;
/// use wayline_query::parse_query;
///
/// let props = parse_query("mypage.com?dataUrl=users.json&limit=10&open=true");
/// assert_eq!(props["dataUrl"], json!("users.json"));
/// assert_eq!(props["limit"], json!(10));
/// assert_eq!(props["open"], json!(true));
/// ```
pub fn parse_query(location: &str) -> Props {
	let mut props = Props::new();
	for (key, text) in decoded_pairs(location) {
		props.insert(key.to_string(), coerce_value(&text).into_value());
	}
	props
}

/// Serializes `(key, value)` pairs into a query string starting with `?`.
///
/// Values are converted to JSON first. Strings are written as-is, numbers and
/// booleans by their literal form, and `null`, objects and arrays as JSON text;
/// the result is percent-encoded. A value that fails to serialize is omitted.
/// Keys are written verbatim.
///
/// ```
/// use serde_json::json;
/// use wayline_query::stringify_query;
///
/// let query = stringify_query([("page", json!(2)), ("filter", json!({"q": "a b"}))]);
/// assert_eq!(query, "?page=2&filter=%7B%22q%22%3A%22a%20b%22%7D");
///
/// let empty: [(&str, i32); 0] = [];
/// assert_eq!(stringify_query(empty), "?");
/// ```
pub fn stringify_query<I, K, V>(pairs: I) -> String
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: Serialize,
{
	let parts: Vec<String> = pairs
		.into_iter()
		.filter_map(|(key, value)| {
			let key = key.as_ref();
			match serde_json::to_value(value) {
				Ok(value) => Some(format!(
					"{}={}",
					key,
					urlencoding::encode(&value_text(&value))
				)),
				Err(err) => {
					tracing::debug!(key, error = %err, "omitting prop that cannot be serialized");
					None
				}
			}
		})
		.collect();

	format!("?{}", parts.join("&"))
}
