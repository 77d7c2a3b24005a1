//! Facade re-export tests

use std::rc::Rc;

use rstest::rstest;
use serde_json::json;
use wayline::prelude::*;

#[rstest]
fn test_prelude_serializer_round_trip() {
	let params = ParamsObject::new("List").with_prop("dataUrl", "users.json");

	let location = format!("mypage.com{}", stringify_params(&params));

	assert_eq!(parse_location(&location), params);
}

#[rstest]
fn test_prelude_router_navigation() {
	let history = Rc::new(MemoryHistory::new("/?component=Home"));
	let config = RouterConfig::new((), |props: RenderProps<Props>, _: &()| props.props);
	let router = Router::with_history(config, history.clone()).unwrap();

	router.go_to("/?component=List&limit=20").unwrap();

	assert_eq!(router.root_component().unwrap()["limit"], json!(20));
	assert_eq!(history.current_location(), "/?component=List&limit=20");
}

#[rstest]
fn test_query_module_reexports() {
	assert_eq!(wayline::query::COMPONENT_KEY, "component");
	assert_eq!(wayline::query::query_string("a?b=1"), "b=1");
}
