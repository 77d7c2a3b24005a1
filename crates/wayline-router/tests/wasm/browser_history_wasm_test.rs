//! Browser history tests
//!
//! Run with `wasm-pack test --headless --chrome crates/wayline-router`.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;
use wasm_bindgen_test::*;
use wayline_router::{BrowserHistory, History, PopStateEvent, Router, RouterConfig};

wasm_bindgen_test_configure!(run_in_browser);

fn location_with_query(query: &str) -> String {
	let location = web_sys::window().unwrap().location();
	format!("{}{}", location.pathname().unwrap(), query)
}

#[wasm_bindgen_test]
fn test_browser_history_supports_push_state() {
	let history = BrowserHistory::new().unwrap();

	assert!(history.supports_push_state());
}

#[wasm_bindgen_test]
fn test_browser_history_push_and_replace() {
	let history = BrowserHistory::new().unwrap();
	let target = location_with_query("?component=List&dataUrl=users.json");

	history.push_state(&json!({}), &target).unwrap();
	assert!(history.current_location().ends_with("?component=List&dataUrl=users.json"));

	let replaced = location_with_query("?component=User&id=7");
	history.replace_state(&json!({"n": 1}), &replaced).unwrap();
	assert!(history.current_location().ends_with("?component=User&id=7"));
}

#[wasm_bindgen_test]
fn test_browser_history_listener_lifecycle() {
	let history = BrowserHistory::new().unwrap();
	let calls = Rc::new(Cell::new(0));
	let counter = calls.clone();

	let id = history
		.listen_popstate(Rc::new(move |_: &PopStateEvent| counter.set(counter.get() + 1)))
		.unwrap();
	history.unlisten_popstate(id);
	// Unknown ids are ignored
	history.unlisten_popstate(id);

	assert_eq!(calls.get(), 0);
	assert_eq!(history.retired_count(), 0);
}

#[wasm_bindgen_test]
fn test_browser_history_frees_listeners_of_stopped_routers() {
	let history = Rc::new(BrowserHistory::new().unwrap());

	for _ in 0..3 {
		let config = RouterConfig::new((), |_, _| ());
		let router = Router::with_history(config, history.clone()).unwrap();
		router.stop();
	}

	assert_eq!(history.retired_count(), 0);
}

#[wasm_bindgen_test]
fn test_router_renders_browser_location() {
	let history = Rc::new(BrowserHistory::new().unwrap());
	history
		.replace_state(&json!({}), &location_with_query("?component=Home&page=2"))
		.unwrap();

	let config = RouterConfig::new((), |props, _| props.props.clone());
	let router = Router::with_history(config, history.clone()).unwrap();

	assert_eq!(router.root_component().unwrap()["page"], json!(2));

	router.go_to(&location_with_query("?component=List")).unwrap();
	assert_eq!(
		router.current_params().and_then(|p| p.component),
		Some("List".to_string())
	);

	router.stop();
	assert!(!router.is_listening());
}
