//! Browser history abstraction.
//!
//! The router never touches `window` directly. It talks to a [`History`]
//! backend instead:
//!
//! - [`BrowserHistory`] wraps `window.history` and `window.location` (WASM only)
//! - [`MemoryHistory`] keeps the session history in memory, for tests and
//!   non-browser hosts

use std::cell::Cell;
use std::rc::Rc;

use serde_json::Value;

use crate::error::HistoryError;

#[cfg(target_arch = "wasm32")]
mod browser;
mod memory;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;
pub use memory::{HistoryEntry, MemoryHistory};

/// Callback invoked for every popstate event.
pub type PopStateHandler = Rc<dyn Fn(&PopStateEvent)>;

/// Navigation type for history updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// Add a new history entry.
	Push,
	/// Replace the current history entry.
	Replace,
}

/// Identifies a registered popstate listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
	pub(crate) fn next(counter: &Cell<u64>) -> Self {
		let id = counter.get();
		counter.set(id + 1);
		Self(id)
	}
}

/// A back/forward navigation, as delivered by the browser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopStateEvent {
	/// State attached to the history entry that became current.
	///
	/// `None` for entries created without state, and for the spurious initial
	/// event some browsers fire on page load.
	pub state: Option<Value>,
}

impl PopStateEvent {
	/// Creates an event carrying `state`.
	pub fn new(state: Value) -> Self {
		Self { state: Some(state) }
	}

	/// Creates an event without state.
	pub fn empty() -> Self {
		Self { state: None }
	}

	/// Returns `true` if the event carries state.
	pub fn has_state(&self) -> bool {
		self.state.is_some()
	}
}

/// The browser history surface the router depends on.
///
/// All methods take `&self`; implementations use interior mutability, since
/// the router and popstate handlers share one backend on a single thread.
pub trait History {
	/// Returns the current location, e.g. `window.location.href`.
	fn current_location(&self) -> String;

	/// Returns `true` if `pushState` is available.
	fn supports_push_state(&self) -> bool;

	/// Adds a history entry for `url` carrying `state`.
	fn push_state(&self, state: &Value, url: &str) -> Result<(), HistoryError>;

	/// Replaces the current history entry with `url` and `state`.
	fn replace_state(&self, state: &Value, url: &str) -> Result<(), HistoryError>;

	/// Performs a full page load of `url`.
	fn assign(&self, url: &str);

	/// Registers `handler` for popstate events.
	fn listen_popstate(&self, handler: PopStateHandler) -> Result<ListenerId, HistoryError>;

	/// Removes the listener registered under `id`. Unknown ids are ignored.
	fn unlisten_popstate(&self, id: ListenerId);
}

/// A click on a link the router should handle.
pub trait LinkEvent {
	/// Suppresses the browser's own navigation.
	fn prevent_default(&self);

	/// Returns the URL the link points to.
	fn target_href(&self) -> Option<String>;
}

#[cfg(target_arch = "wasm32")]
impl LinkEvent for web_sys::Event {
	fn prevent_default(&self) {
		web_sys::Event::prevent_default(self);
	}

	fn target_href(&self) -> Option<String> {
		use wasm_bindgen::JsCast;

		let target = self.current_target()?;
		if let Some(anchor) = target.dyn_ref::<web_sys::HtmlAnchorElement>() {
			return Some(anchor.href());
		}
		target.dyn_ref::<web_sys::Element>()?.get_attribute("href")
	}
}

/// A link click outside the browser, for tests and non-DOM hosts.
#[derive(Debug, Default)]
pub struct LinkClick {
	href: Option<String>,
	default_prevented: Cell<bool>,
}

impl LinkClick {
	/// Creates a click on a link pointing to `href`.
	pub fn new(href: impl Into<String>) -> Self {
		Self {
			href: Some(href.into()),
			default_prevented: Cell::new(false),
		}
	}

	/// Creates a click on an element without an `href`.
	pub fn without_href() -> Self {
		Self::default()
	}

	/// Returns `true` once `prevent_default` has been called.
	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}

impl LinkEvent for LinkClick {
	fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	fn target_href(&self) -> Option<String> {
		self.href.clone()
	}
}

/// Returns the history backend for the current target.
///
/// On WASM this is [`BrowserHistory`]; elsewhere a [`MemoryHistory`] starting
/// at `/`.
pub fn default_history() -> Result<Rc<dyn History>, HistoryError> {
	#[cfg(target_arch = "wasm32")]
	{
		Ok(Rc::new(BrowserHistory::new()?))
	}

	#[cfg(not(target_arch = "wasm32"))]
	{
		Ok(Rc::new(MemoryHistory::default()))
	}
}
