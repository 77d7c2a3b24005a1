//! Wayline Router - query-string driven navigation for single-page applications
//!
//! The whole application state lives in the location's query string. A
//! [`Router`] turns that query string into a component name and props, hands
//! them to a render callback, and keeps the browser history in sync.
//!
//! ## Architecture
//!
//! - [`router`](crate::Router): navigation entry points and the render cycle
//! - [`RouterConfig`]: render target, default props and callbacks
//! - [`history`]: the [`History`] backend trait with a browser implementation
//!   (WASM only) and an in-memory one
//! - [`wayline_query`]: the query string serializer the router parses with
//!
//! ## Navigation flow
//!
//! ```text
//! route_link / go_to / replace
//!         │
//!         ├─ pushState unavailable ──► full page load
//!         │
//!         └─ pushState / replaceState ──► parse ──► render ──► on_change
//!
//! popstate (back/forward) ──────────────► parse ──► render ──► on_change
//! ```
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use wayline_router::{LinkClick, MemoryHistory, Router, RouterConfig};
//!
//! let history = Rc::new(MemoryHistory::new("/?component=Home"));
//! let config = RouterConfig::new((), |props, _| props.props.clone())
//! 	.with_default_prop("theme", "dark");
//!
//! let router = Router::with_history(config, history.clone()).unwrap();
//!
//! let click = LinkClick::new("/?component=User&id=7");
//! router.route_link(&click).unwrap();
//! assert!(click.default_prevented());
//!
//! let props = router.root_component().unwrap();
//! assert_eq!(props["id"], 7);
//! assert_eq!(props["theme"], "dark");
//!
//! history.back();
//! let params = router.current_params().unwrap();
//! assert_eq!(params.component.as_deref(), Some("Home"));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod history;
mod router;

pub use config::{ChangeFn, RenderFn, RouterConfig};
pub use error::{ConfigError, HistoryError, RenderError, RouterError};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{
	History, HistoryEntry, LinkClick, LinkEvent, ListenerId, MemoryHistory, NavigationType,
	PopStateEvent, PopStateHandler, default_history,
};
pub use router::{RenderProps, Router, WeakRouter};

pub use wayline_query;
pub use wayline_query::{ParamsObject, Props};
