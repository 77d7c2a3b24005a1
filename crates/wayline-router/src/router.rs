//! Core Router Implementation.
//!
//! Every navigation intent (initial load, link click, programmatic
//! navigation, back/forward) ends in exactly one render call through
//! [`Router::apply_location`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde_json::{Map, Value};
use wayline_query::{ParamsObject, Props, parse_location};

use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::history::{
	History, LinkEvent, ListenerId, NavigationType, PopStateEvent, PopStateHandler, default_history,
};

/// Props handed to the render callback.
///
/// The router handle travels as its own field so rendered views can navigate
/// without a global router. A URL key named `router` stays in `props`.
pub struct RenderProps<C: 'static, Ct: 'static = ()> {
	/// The router that triggered this render.
	pub router: Router<C, Ct>,
	/// Default props overridden by the props parsed from the location.
	pub props: Props,
}

impl<C: 'static, Ct: 'static> RenderProps<C, Ct> {
	/// Returns the prop stored under `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.props.get(key)
	}
}

impl<C: 'static, Ct: 'static> std::fmt::Debug for RenderProps<C, Ct> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RenderProps")
			.field("router", &self.router)
			.field("props", &self.props)
			.finish()
	}
}

struct RouterInner<C: 'static, Ct: 'static> {
	config: RouterConfig<C, Ct>,
	history: Rc<dyn History>,
	root_component: RefCell<Option<Rc<C>>>,
	current_params: RefCell<Option<ParamsObject>>,
	listener: Cell<Option<ListenerId>>,
	/// Number of render calls currently on the stack.
	render_depth: Cell<usize>,
}

impl<C: 'static, Ct: 'static> Drop for RouterInner<C, Ct> {
	fn drop(&mut self) {
		if let Some(id) = self.listener.take() {
			self.history.unlisten_popstate(id);
		}
	}
}

/// The query-string driven client-side router.
///
/// `Router` is a cheap handle: clones share the same state, and two handles
/// compare equal when they point at the same router.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use wayline_router::{MemoryHistory, Router, RouterConfig};
///
/// let history = Rc::new(MemoryHistory::new("/app?component=Home"));
/// let config = RouterConfig::new((), |props, _| {
/// 	format!("{:?}", props.get("component"))
/// });
///
/// let router = Router::with_history(config, history.clone()).unwrap();
/// router.go_to("/app?component=List&dataUrl=users.json").unwrap();
///
/// let params = router.current_params().unwrap();
/// assert_eq!(params.component.as_deref(), Some("List"));
/// assert_eq!(history.len(), 2);
/// ```
pub struct Router<C: 'static, Ct: 'static = ()> {
	inner: Rc<RouterInner<C, Ct>>,
}

impl<C: 'static, Ct: 'static> Clone for Router<C, Ct> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<C: 'static, Ct: 'static> PartialEq for Router<C, Ct> {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl<C: 'static, Ct: 'static> std::fmt::Debug for Router<C, Ct> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("current_params", &self.inner.current_params.borrow())
			.field("has_root_component", &self.inner.root_component.borrow().is_some())
			.field("listening", &self.is_listening())
			.finish()
	}
}

impl<C: 'static, Ct: 'static> Router<C, Ct> {
	/// Creates a router on the default history backend and renders the
	/// current location.
	///
	/// See [`default_history`] for the backend choice.
	pub fn new(config: RouterConfig<C, Ct>) -> Result<Self, RouterError> {
		let history = default_history()?;
		Self::with_history(config, history)
	}

	/// Creates a router on `history` and renders the current location.
	///
	/// The popstate listener is registered first, then the current history
	/// entry is stamped with state (so that returning to it is not mistaken for
	/// the spurious initial popstate), and finally the current location is
	/// rendered. No history entry is pushed.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Render`] if the initial render fails and
	/// [`RouterError::History`] if the backend rejects the listener or the
	/// state stamp.
	pub fn with_history(
		config: RouterConfig<C, Ct>,
		history: Rc<dyn History>,
	) -> Result<Self, RouterError> {
		let router = Self {
			inner: Rc::new(RouterInner {
				config,
				history,
				root_component: RefCell::new(None),
				current_params: RefCell::new(None),
				listener: Cell::new(None),
				render_depth: Cell::new(0),
			}),
		};

		let id = router
			.inner
			.history
			.listen_popstate(Self::popstate_handler(Rc::downgrade(&router.inner)))?;
		router.inner.listener.set(Some(id));

		let location = router.inner.history.current_location();
		if router.inner.history.supports_push_state() {
			router.inner.history.replace_state(&entry_state(), &location)?;
		}
		router.apply_location(&location)?;

		Ok(router)
	}

	fn popstate_handler(inner: Weak<RouterInner<C, Ct>>) -> PopStateHandler {
		Rc::new(move |event: &PopStateEvent| {
			let Some(inner) = inner.upgrade() else {
				return;
			};
			if let Err(err) = (Router { inner }).on_pop_state(event) {
				tracing::error!(error = %err, "back/forward navigation failed");
			}
		})
	}

	/// Handles a click on a link, navigating to its target without a page load.
	///
	/// Bind this to anchor click handlers. An event without a target href is
	/// left alone, so the browser's default behavior still applies.
	pub fn route_link<E: LinkEvent + ?Sized>(&self, event: &E) -> Result<(), RouterError> {
		let Some(href) = event.target_href() else {
			tracing::warn!("link event has no target href; leaving it to the browser");
			return Ok(());
		};

		event.prevent_default();
		self.navigate(&href, NavigationType::Push)
	}

	/// Navigates to `location`, adding a history entry.
	pub fn go_to(&self, location: &str) -> Result<(), RouterError> {
		self.navigate(location, NavigationType::Push)
	}

	/// Navigates to `location`, replacing the current history entry.
	pub fn replace(&self, location: &str) -> Result<(), RouterError> {
		self.navigate(location, NavigationType::Replace)
	}

	/// Handles a back/forward navigation.
	///
	/// Events without state are ignored; some browsers fire one on page load.
	/// Otherwise the current history location is rendered without touching
	/// the history.
	pub fn on_pop_state(&self, event: &PopStateEvent) -> Result<(), RouterError> {
		if !event.has_state() {
			tracing::debug!("ignoring popstate event without state");
			return Ok(());
		}

		let location = self.inner.history.current_location();
		self.apply_location(&location)
	}

	/// Internal navigation implementation.
	fn navigate(&self, location: &str, nav_type: NavigationType) -> Result<(), RouterError> {
		let history = &self.inner.history;

		if !history.supports_push_state() {
			tracing::info!(location, "history API unavailable, falling back to a full page load");
			history.assign(location);
			return Ok(());
		}

		match nav_type {
			NavigationType::Push => history.push_state(&entry_state(), location)?,
			NavigationType::Replace => history.replace_state(&entry_state(), location)?,
		}

		self.apply_location(location)
	}

	/// Parses `location`, renders it, and notifies the change callback.
	fn apply_location(&self, location: &str) -> Result<(), RouterError> {
		let inner = &self.inner;
		let params = parse_location(location);

		let mut props = inner.config.default_props.clone();
		props.extend(params.props.iter().map(|(k, v)| (k.clone(), v.clone())));

		let depth = inner.render_depth.get();
		if depth > 0 {
			tracing::warn!(location, "navigation started from inside a render call");
		}
		tracing::debug!(location, component = ?params.component, "rendering location");

		// No borrow is held across the callback, so it may navigate again
		inner.render_depth.set(depth + 1);
		let rendered = (inner.config.on_render)(
			RenderProps {
				router: self.clone(),
				props,
			},
			&inner.config.container,
		);
		inner.render_depth.set(depth);

		let component = rendered.map_err(RouterError::Render)?;
		// Replaced values are dropped after the borrow ends; their Drop may call back in
		let previous = inner.root_component.replace(Some(Rc::new(component)));
		drop(previous);
		inner.current_params.replace(Some(params.clone()));

		if let Some(on_change) = &inner.config.on_change {
			on_change(&params);
		}

		Ok(())
	}

	/// Releases the popstate listener and the rendered component. Calling it
	/// again has no effect.
	///
	/// Dropping the last handle does the same, unless the rendered component
	/// holds a [`Router`] of its own: that reference keeps the router alive
	/// until `stop` releases the component. Components that need to navigate
	/// later can hold a [`WeakRouter`] instead.
	pub fn stop(&self) {
		if let Some(id) = self.inner.listener.take() {
			self.inner.history.unlisten_popstate(id);
		}
		let previous = self.inner.root_component.take();
		drop(previous);
	}

	/// Returns a handle that does not keep the router alive.
	pub fn downgrade(&self) -> WeakRouter<C, Ct> {
		WeakRouter {
			inner: Rc::downgrade(&self.inner),
		}
	}

	/// Returns `true` until [`stop`](Self::stop) is called.
	pub fn is_listening(&self) -> bool {
		self.inner.listener.get().is_some()
	}

	/// Returns the component handle produced by the last successful render.
	pub fn root_component(&self) -> Option<C>
	where
		C: Clone,
	{
		self.inner.root_component.borrow().as_deref().cloned()
	}

	/// Calls `f` with the component handle produced by the last successful render.
	///
	/// `f` may navigate; the handle it sees stays valid even if a new render
	/// replaces it.
	pub fn with_root_component<R>(&self, f: impl FnOnce(Option<&C>) -> R) -> R {
		let component = self.inner.root_component.borrow().clone();
		f(component.as_deref())
	}

	/// Returns the params of the last successful render.
	pub fn current_params(&self) -> Option<ParamsObject> {
		self.inner.current_params.borrow().clone()
	}

	/// Returns the configuration the router was built with.
	pub fn config(&self) -> &RouterConfig<C, Ct> {
		&self.inner.config
	}

	/// Returns the history backend.
	pub fn history(&self) -> &dyn History {
		self.inner.history.as_ref()
	}

	/// Returns `true` if both handles point at the same router.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

/// A [`Router`] handle that does not keep the router alive.
///
/// Store this in rendered components instead of [`RenderProps::router`] so
/// that dropping the last [`Router`] still releases the popstate listener.
pub struct WeakRouter<C: 'static, Ct: 'static = ()> {
	inner: Weak<RouterInner<C, Ct>>,
}

impl<C: 'static, Ct: 'static> WeakRouter<C, Ct> {
	/// Returns the router, or `None` once every [`Router`] handle is gone.
	pub fn upgrade(&self) -> Option<Router<C, Ct>> {
		self.inner.upgrade().map(|inner| Router { inner })
	}
}

impl<C: 'static, Ct: 'static> Clone for WeakRouter<C, Ct> {
	fn clone(&self) -> Self {
		Self {
			inner: Weak::clone(&self.inner),
		}
	}
}

impl<C: 'static, Ct: 'static> std::fmt::Debug for WeakRouter<C, Ct> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WeakRouter")
			.field("alive", &(self.inner.strong_count() > 0))
			.finish()
	}
}

/// State attached to every entry the router writes.
fn entry_state() -> Value {
	Value::Object(Map::new())
}
