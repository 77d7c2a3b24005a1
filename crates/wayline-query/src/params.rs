//! Component + props parameters carried by a location.
//!
//! A location names the component to render and the props to render it with:
//!
//! ```text
//! mypage.com?component=List&props=%7B%22dataUrl%22%3A%22users.json%22%7D
//! ```
//!
//! `component` is read as plain text. `props` holds a JSON object whose entries
//! become the props. Any other key is a prop of its own, which keeps
//! hand-written links such as `?component=List&dataUrl=users.json` working.
//! Pairs are applied left to right and later writes win.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Props;
use crate::coerce::{CoercedValue, coerce_value};
use crate::query::{decoded_pairs, stringify_query};

/// Query key naming the component.
pub const COMPONENT_KEY: &str = "component";

/// Query key holding the JSON-encoded props object.
pub const PROPS_KEY: &str = "props";

/// Structured result of parsing a location: which component, with which props.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamsObject {
	/// Component identifier, `None` when the location does not name one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub component: Option<String>,
	/// Props to render the component with.
	#[serde(default)]
	pub props: Props,
}

impl ParamsObject {
	/// Creates params for `component` with no props.
	pub fn new(component: impl Into<String>) -> Self {
		Self {
			component: Some(component.into()),
			props: Props::new(),
		}
	}

	/// Adds a prop, replacing any previous value under `key`.
	pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.props.insert(key.into(), value.into());
		self
	}

	/// Serializes the params into a query string. See [`stringify_params`].
	pub fn to_query_string(&self) -> String {
		stringify_params(self)
	}
}

impl fmt::Display for ParamsObject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&stringify_params(self))
	}
}

impl FromStr for ParamsObject {
	type Err = Infallible;

	fn from_str(location: &str) -> Result<Self, Self::Err> {
		Ok(parse_location(location))
	}
}

/// Parses `location` into a [`ParamsObject`]. Never fails.
///
/// ```
/// use serde_json::json;
/// use wayline_query::parse_location;
///
/// let params = parse_location("mypage.com?component=List&dataUrl=users.json");
/// assert_eq!(params.component.as_deref(), Some("List"));
/// assert_eq!(params.props["dataUrl"], json!("users.json"));
///
/// let params = parse_location(
/// 	"mypage.com?component=List&props=%7B%22dataUrl%22%3A%22users.json%22%7D",
/// );
/// assert_eq!(params.props["dataUrl"], json!("users.json"));
/// ```
pub fn parse_location(location: &str) -> ParamsObject {
	let mut params = ParamsObject::default();

	for (key, text) in decoded_pairs(location) {
		match key {
			COMPONENT_KEY => {
				let name = match coerce_value(&text) {
					CoercedValue::ParsedAsJson(Value::String(name)) => name,
					_ => text.into_owned(),
				};
				params.component = Some(name);
			}
			PROPS_KEY => match coerce_value(&text) {
				CoercedValue::ParsedAsJson(Value::Object(props)) => params.props.extend(props),
				other => {
					params.props.insert(PROPS_KEY.to_string(), other.into_value());
				}
			},
			_ => {
				params
					.props
					.insert(key.to_string(), coerce_value(&text).into_value());
			}
		}
	}

	params
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
	Component(Cow<'a, str>),
	Props(&'a Props),
}

/// Text written for a component name.
///
/// `parse_location` unwraps a name that reads as a JSON string, so such names
/// are written JSON-quoted to come back unchanged.
fn component_text(name: &str) -> Cow<'_, str> {
	match coerce_value(name) {
		CoercedValue::ParsedAsJson(Value::String(_)) => Cow::Owned(Value::from(name).to_string()),
		_ => Cow::Borrowed(name),
	}
}

/// Serializes `params` as `?component=<name>&props=<JSON>`.
///
/// The `component` pair is left out when there is no component. `props` is
/// always written, so empty props encode as `%7B%7D`.
///
/// ```
/// use wayline_query::{ParamsObject, stringify_params};
///
/// let params = ParamsObject::new("List").with_prop("dataUrl", "users.json");
/// assert_eq!(
/// 	stringify_params(&params),
/// 	"?component=List&props=%7B%22dataUrl%22%3A%22users.json%22%7D"
/// );
/// ```
pub fn stringify_params(params: &ParamsObject) -> String {
	let component = params
		.component
		.as_deref()
		.map(|name| (COMPONENT_KEY, Part::Component(component_text(name))));

	stringify_query(
		component
			.into_iter()
			.chain(std::iter::once((PROPS_KEY, Part::Props(&params.props)))),
	)
}
