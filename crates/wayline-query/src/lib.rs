//! JSON-aware query string serialization for wayline.
//!
//! This crate converts between a location's query string and the structured
//! parameters a single-page application renders from. It holds no state and
//! performs no I/O.
//!
//! ## Layers
//!
//! - **Flat** ([`parse_query`], [`stringify_query`]): `key=value` pairs to a
//!   [`Props`] mapping and back. Values that are valid JSON come back typed.
//! - **Params** ([`parse_location`], [`stringify_params`]): a
//!   [`ParamsObject`] naming a component and its props.
//!
//! Malformed input never fails. Undecodable escapes and invalid JSON degrade to
//! plain strings, and values that cannot be serialized are omitted.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use wayline_query::{ParamsObject, parse_location, stringify_params};
//!
//! let params = ParamsObject::new("User")
//! 	.with_prop("id", 42)
//! 	.with_prop("tabs", json!(["posts", "likes"]));
//!
//! let location = format!("/app{}", stringify_params(&params));
//! assert_eq!(parse_location(&location), params);
//! ```

#![warn(missing_docs)]

mod coerce;
mod params;
mod query;

pub use coerce::{CoercedValue, coerce_value};
pub use params::{COMPONENT_KEY, PROPS_KEY, ParamsObject, parse_location, stringify_params};
pub use query::{parse_query, query_string, stringify_query};

/// Props mapping. Keys keep their insertion order.
pub type Props = serde_json::Map<String, serde_json::Value>;
