//! # Wayline
//!
//! Query-string driven navigation for single-page applications.
//!
//! The complete UI state of a page (which component to show and with which
//! props) lives in the location's query string. Links are plain URLs,
//! bookmarks restore the exact view, and the back button just works.
//!
//! ## Feature Flags
//!
//! - `query` (default) - JSON-aware query string serializer
//! - `router` (default) - History API router built on the serializer
//!
//! ## Quick Example
//!
//! ```rust
//! use std::rc::Rc;
//! use wayline::prelude::*;
//!
//! let history = Rc::new(MemoryHistory::new("/?component=Home"));
//! let config = RouterConfig::new((), |props, _| props.props.len());
//! let router = Router::with_history(config, history).unwrap();
//!
//! let link = format!("/{}", ParamsObject::new("User").with_prop("id", 7));
//! router.go_to(&link).unwrap();
//!
//! assert_eq!(router.current_params().unwrap().props["id"], 7);
//! ```

#[cfg(feature = "query")]
pub mod query;
#[cfg(feature = "router")]
pub mod router;

#[cfg(feature = "query")]
pub use wayline_query::{ParamsObject, Props, parse_location, stringify_params};
#[cfg(feature = "router")]
pub use wayline_router::{Router, RouterConfig, RouterError};

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "query")]
	pub use crate::query::{
		ParamsObject, Props, parse_location, parse_query, stringify_params, stringify_query,
	};

	#[cfg(feature = "router")]
	pub use crate::router::{
		History, LinkEvent, MemoryHistory, RenderProps, Router, RouterConfig, RouterError,
	};
}
