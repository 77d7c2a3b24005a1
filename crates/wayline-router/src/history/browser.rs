//! `window.history` backed history (WASM only).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use super::{History, ListenerId, PopStateEvent, PopStateHandler};
use crate::error::HistoryError;

type PopStateClosure = Closure<dyn FnMut(web_sys::PopStateEvent)>;

/// History backed by the browser's History and Location APIs.
///
/// Each popstate listener is kept as the exact [`Closure`] handed to
/// `addEventListener`, and that same closure is handed to
/// `removeEventListener` when the listener is dropped.
pub struct BrowserHistory {
	window: web_sys::Window,
	listeners: RefCell<HashMap<ListenerId, PopStateClosure>>,
	// Unregistered closures may still be on the stack (a render that calls
	// `stop()` while handling popstate), so they are freed once no dispatch runs
	retired: RefCell<Vec<PopStateClosure>>,
	/// Number of popstate dispatches currently on the stack.
	dispatching: Rc<Cell<usize>>,
	next_listener: Cell<u64>,
}

impl std::fmt::Debug for BrowserHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BrowserHistory")
			.field("listeners_count", &self.listeners.borrow().len())
			.field("retired_count", &self.retired.borrow().len())
			.finish()
	}
}

impl BrowserHistory {
	/// Creates a backend for the global `window`.
	///
	/// # Errors
	///
	/// Returns [`HistoryError::NoWindow`] outside a browser window context,
	/// e.g. in a web worker.
	pub fn new() -> Result<Self, HistoryError> {
		let window = web_sys::window().ok_or(HistoryError::NoWindow)?;

		Ok(Self {
			window,
			listeners: RefCell::new(HashMap::new()),
			retired: RefCell::new(Vec::new()),
			dispatching: Rc::new(Cell::new(0)),
			next_listener: Cell::new(0),
		})
	}

	/// Returns the number of unregistered listeners not yet freed.
	pub fn retired_count(&self) -> usize {
		self.retired.borrow().len()
	}

	fn free_retired(&self) {
		if self.dispatching.get() == 0 {
			let retired = std::mem::take(&mut *self.retired.borrow_mut());
			drop(retired);
		}
	}
}

fn js_error_message(value: &JsValue) -> String {
	value
		.as_string()
		.or_else(|| {
			value
				.dyn_ref::<js_sys::Error>()
				.map(|err| String::from(err.message()))
		})
		.unwrap_or_else(|| format!("{:?}", value))
}

fn state_to_js(state: &Value) -> JsValue {
	js_sys::JSON::parse(&state.to_string()).unwrap_or(JsValue::NULL)
}

fn state_from_js(state: JsValue) -> Option<Value> {
	if state.is_null() || state.is_undefined() {
		return None;
	}

	// State written by other scripts may not be JSON; it still counts as present
	let parsed = js_sys::JSON::stringify(&state)
		.ok()
		.and_then(|text| text.as_string())
		.and_then(|text| serde_json::from_str(&text).ok())
		.unwrap_or(Value::Null);
	Some(parsed)
}

impl History for BrowserHistory {
	fn current_location(&self) -> String {
		self.window.location().href().unwrap_or_default()
	}

	fn supports_push_state(&self) -> bool {
		self.window.history().is_ok_and(|history| {
			js_sys::Reflect::has(&history, &JsValue::from_str("pushState")).unwrap_or(false)
		})
	}

	fn push_state(&self, state: &Value, url: &str) -> Result<(), HistoryError> {
		let history = self
			.window
			.history()
			.map_err(|e| HistoryError::PushState(js_error_message(&e)))?;

		history
			.push_state_with_url(&state_to_js(state), "", Some(url))
			.map_err(|e| HistoryError::PushState(js_error_message(&e)))
	}

	fn replace_state(&self, state: &Value, url: &str) -> Result<(), HistoryError> {
		let history = self
			.window
			.history()
			.map_err(|e| HistoryError::ReplaceState(js_error_message(&e)))?;

		history
			.replace_state_with_url(&state_to_js(state), "", Some(url))
			.map_err(|e| HistoryError::ReplaceState(js_error_message(&e)))
	}

	fn assign(&self, url: &str) {
		if let Err(err) = self.window.location().set_href(url) {
			tracing::error!(url, error = %js_error_message(&err), "full page navigation failed");
		}
	}

	fn listen_popstate(&self, handler: PopStateHandler) -> Result<ListenerId, HistoryError> {
		self.free_retired();

		let dispatching = self.dispatching.clone();
		let closure = PopStateClosure::new(move |event: web_sys::PopStateEvent| {
			dispatching.set(dispatching.get() + 1);
			handler(&PopStateEvent {
				state: state_from_js(event.state()),
			});
			dispatching.set(dispatching.get() - 1);
		});

		self.window
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			.map_err(|e| HistoryError::Listen(js_error_message(&e)))?;

		let id = ListenerId::next(&self.next_listener);
		self.listeners.borrow_mut().insert(id, closure);
		Ok(id)
	}

	fn unlisten_popstate(&self, id: ListenerId) {
		let Some(closure) = self.listeners.borrow_mut().remove(&id) else {
			return;
		};

		if let Err(err) = self
			.window
			.remove_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		{
			tracing::warn!(error = %js_error_message(&err), "failed to remove popstate listener");
		}
		self.retired.borrow_mut().push(closure);
		self.free_retired();
	}
}
