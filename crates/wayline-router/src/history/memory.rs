//! In-memory session history.

use std::cell::{Cell, RefCell};

use serde_json::Value;

use super::{History, ListenerId, PopStateEvent, PopStateHandler};
use crate::error::HistoryError;

/// A single session history entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
	/// Entry URL.
	pub url: String,
	/// State attached by `pushState` / `replaceState`.
	pub state: Option<Value>,
}

/// Session history kept in memory.
///
/// Behaves like a browser tab: pushing truncates forward entries, and
/// [`back`](Self::back) / [`forward`](Self::forward) move the cursor and fire
/// popstate with the state of the entry that became current.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use wayline_router::{History, MemoryHistory};
///
/// let history = MemoryHistory::new("/app?component=Home");
/// history.push_state(&json!({}), "/app?component=List").unwrap();
///
/// assert!(history.back());
/// assert_eq!(history.current_location(), "/app?component=Home");
/// ```
pub struct MemoryHistory {
	entries: RefCell<Vec<HistoryEntry>>,
	cursor: Cell<usize>,
	push_state_supported: Cell<bool>,
	hard_navigations: RefCell<Vec<String>>,
	listeners: RefCell<Vec<(ListenerId, PopStateHandler)>>,
	next_listener: Cell<u64>,
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemoryHistory")
			.field("entries", &self.entries.borrow())
			.field("cursor", &self.cursor.get())
			.field("push_state_supported", &self.push_state_supported.get())
			.field("listeners_count", &self.listeners.borrow().len())
			.finish()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryHistory {
	/// Creates a history with a single entry for `initial_url`.
	pub fn new(initial_url: impl Into<String>) -> Self {
		Self {
			entries: RefCell::new(vec![HistoryEntry {
				url: initial_url.into(),
				state: None,
			}]),
			cursor: Cell::new(0),
			push_state_supported: Cell::new(true),
			hard_navigations: RefCell::new(Vec::new()),
			listeners: RefCell::new(Vec::new()),
			next_listener: Cell::new(0),
		}
	}

	/// Simulates a runtime with or without `pushState`.
	pub fn set_push_state_supported(&self, supported: bool) {
		self.push_state_supported.set(supported);
	}

	/// Returns a snapshot of all entries.
	pub fn entries(&self) -> Vec<HistoryEntry> {
		self.entries.borrow().clone()
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	/// Always `false`: a history has at least its initial entry.
	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}

	/// Returns the index of the current entry.
	pub fn cursor(&self) -> usize {
		self.cursor.get()
	}

	/// Returns the current entry.
	pub fn current_entry(&self) -> Option<HistoryEntry> {
		self.entries.borrow().get(self.cursor.get()).cloned()
	}

	/// Returns every URL passed to [`History::assign`], in order.
	pub fn hard_navigations(&self) -> Vec<String> {
		self.hard_navigations.borrow().clone()
	}

	/// Returns the number of registered popstate listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.borrow().len()
	}

	/// Moves one entry back. Returns `false` at the first entry.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Moves one entry forward. Returns `false` at the last entry.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Moves the cursor by `delta` and fires popstate with the new entry's state.
	///
	/// Returns `false`, without firing, if the target is out of range.
	pub fn go(&self, delta: isize) -> bool {
		let Some(target) = self.cursor.get().checked_add_signed(delta) else {
			return false;
		};
		let state = match self.entries.borrow().get(target) {
			Some(entry) => entry.state.clone(),
			None => return false,
		};

		self.cursor.set(target);
		self.dispatch_popstate(&PopStateEvent { state });
		true
	}

	/// Delivers `event` to every registered listener.
	pub fn dispatch_popstate(&self, event: &PopStateEvent) {
		// Handlers may navigate or unregister, so no borrow is held while they run
		let handlers: Vec<PopStateHandler> = self
			.listeners
			.borrow()
			.iter()
			.map(|(_, handler)| handler.clone())
			.collect();

		for handler in handlers {
			handler(event);
		}
	}
}

impl History for MemoryHistory {
	fn current_location(&self) -> String {
		self.entries
			.borrow()
			.get(self.cursor.get())
			.map(|entry| entry.url.clone())
			.unwrap_or_default()
	}

	fn supports_push_state(&self) -> bool {
		self.push_state_supported.get()
	}

	fn push_state(&self, state: &Value, url: &str) -> Result<(), HistoryError> {
		if !self.push_state_supported.get() {
			return Err(HistoryError::PushState("history API unavailable".to_string()));
		}

		let mut entries = self.entries.borrow_mut();
		entries.truncate(self.cursor.get() + 1);
		entries.push(HistoryEntry {
			url: url.to_string(),
			state: Some(state.clone()),
		});
		self.cursor.set(entries.len() - 1);
		Ok(())
	}

	fn replace_state(&self, state: &Value, url: &str) -> Result<(), HistoryError> {
		if !self.push_state_supported.get() {
			return Err(HistoryError::ReplaceState("history API unavailable".to_string()));
		}

		let mut entries = self.entries.borrow_mut();
		match entries.get_mut(self.cursor.get()) {
			Some(entry) => {
				*entry = HistoryEntry {
					url: url.to_string(),
					state: Some(state.clone()),
				};
				Ok(())
			}
			None => Err(HistoryError::ReplaceState("no current entry".to_string())),
		}
	}

	fn assign(&self, url: &str) {
		self.hard_navigations.borrow_mut().push(url.to_string());

		// A full page load starts a fresh document at the end of the session history
		let mut entries = self.entries.borrow_mut();
		entries.truncate(self.cursor.get() + 1);
		entries.push(HistoryEntry {
			url: url.to_string(),
			state: None,
		});
		self.cursor.set(entries.len() - 1);
	}

	fn listen_popstate(&self, handler: PopStateHandler) -> Result<ListenerId, HistoryError> {
		let id = ListenerId::next(&self.next_listener);
		self.listeners.borrow_mut().push((id, handler));
		Ok(id)
	}

	fn unlisten_popstate(&self, id: ListenerId) {
		self.listeners
			.borrow_mut()
			.retain(|(listener, _)| *listener != id);
	}
}
