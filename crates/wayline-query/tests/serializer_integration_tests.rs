//! Integration tests for the query serializer
//!
//! These tests pin the location formats the router relies on:
//! 1. Hand-written links with flat keys
//! 2. Generated links with a JSON `props` blob
//! 3. Degradation on malformed input

use rstest::rstest;
use serde_json::json;
use wayline_query::{ParamsObject, parse_location, parse_query, stringify_params, stringify_query};

#[rstest]
fn test_flat_link_parses_into_params() {
	let params = parse_location("mypage.com?component=List&dataUrl=users.json");

	assert_eq!(params, ParamsObject::new("List").with_prop("dataUrl", "users.json"));
}

#[rstest]
fn test_generated_link_exact_form() {
	let params = ParamsObject::new("List").with_prop("dataUrl", "users.json");

	let query = stringify_params(&params);

	assert!(query.contains("component=List"));
	assert!(query.contains("props=%7B%22dataUrl%22%3A%22users.json%22%7D"));
	assert_eq!(query, "?component=List&props=%7B%22dataUrl%22%3A%22users.json%22%7D");
}

#[rstest]
fn test_generated_link_parses_back() {
	let params = ParamsObject::new("Search")
		.with_prop("query", "rust & wasm")
		.with_prop("page", 3)
		.with_prop("filters", json!({"lang": ["en", "ja"], "exact": false}))
		.with_prop("cursor", json!(null));

	let href = format!("https://example.com/search{}", stringify_params(&params));

	assert_eq!(parse_location(&href), params);
}

#[rstest]
fn test_both_conventions_in_one_location() {
	let params = parse_location(
		"mypage.com?component=List&props=%7B%22dataUrl%22%3A%22users.json%22%7D&limit=20",
	);

	assert_eq!(params.component.as_deref(), Some("List"));
	assert_eq!(params.props["dataUrl"], json!("users.json"));
	assert_eq!(params.props["limit"], json!(20));
}

#[rstest]
#[case("mypage.com?component=List&props=%7Bbroken")]
#[case("mypage.com?component=List&props={broken")]
fn test_malformed_props_blob_degrades_to_string(#[case] location: &str) {
	let params = parse_location(location);

	assert_eq!(params.component.as_deref(), Some("List"));
	assert_eq!(params.props["props"], json!("{broken"));
}

#[rstest]
fn test_flat_layer_round_trip() {
	let props = parse_query("x?a=1&b=two&c=%7B%22d%22%3A%5B1%2C2%5D%7D");

	let query = stringify_query(&props);

	assert_eq!(query, "?a=1&b=two&c=%7B%22d%22%3A%5B1%2C2%5D%7D");
	assert_eq!(parse_query(&query), props);
}

#[rstest]
fn test_empty_boundaries() {
	assert!(parse_query("mypage.com?").is_empty());
	assert!(parse_location("").props.is_empty());
	assert_eq!(stringify_query(&wayline_query::Props::new()), "?");
}
