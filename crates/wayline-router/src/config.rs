//! Router configuration.

use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use wayline_query::{ParamsObject, Props};

use crate::error::{ConfigError, RenderError};
use crate::router::RenderProps;

/// Render callback: turns props into a component handle.
pub type RenderFn<C, Ct> = Rc<dyn Fn(RenderProps<C, Ct>, &Ct) -> Result<C, RenderError>>;

/// Change callback: receives the params of every successful navigation.
pub type ChangeFn = Rc<dyn Fn(&ParamsObject)>;

/// Options a [`Router`](crate::Router) is built from. Immutable once the
/// router is constructed.
///
/// - `C`: component handle returned by the render callback
/// - `Ct`: render target handed to every render call
///
/// # Example
///
/// ```
/// use wayline_router::RouterConfig;
///
/// let config = RouterConfig::new("#app", |props, container: &&str| {
/// 	format!("{} rendered into {}", props.props.len(), container)
/// })
/// .with_default_prop("theme", "dark")
/// .on_change(|params| println!("now showing {:?}", params.component));
///
/// assert_eq!(config.default_props()["theme"], "dark");
/// ```
pub struct RouterConfig<C: 'static, Ct: 'static = ()> {
	pub(crate) default_props: Props,
	pub(crate) container: Ct,
	pub(crate) on_render: RenderFn<C, Ct>,
	pub(crate) on_change: Option<ChangeFn>,
}

impl<C: 'static, Ct: 'static> std::fmt::Debug for RouterConfig<C, Ct> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterConfig")
			.field("default_props", &self.default_props)
			.field("has_on_change", &self.on_change.is_some())
			.finish()
	}
}

impl<C: 'static, Ct: 'static> RouterConfig<C, Ct> {
	/// Creates a configuration with an infallible render callback.
	pub fn new<F>(container: Ct, on_render: F) -> Self
	where
		F: Fn(RenderProps<C, Ct>, &Ct) -> C + 'static,
	{
		Self::from_render_fn(
			container,
			Rc::new(
				move |props: RenderProps<C, Ct>, container: &Ct| -> Result<C, RenderError> {
					Ok(on_render(props, container))
				},
			),
		)
	}

	/// Creates a configuration with a render callback that may fail.
	///
	/// A failed render aborts the navigation and surfaces as
	/// [`RouterError::Render`](crate::RouterError::Render).
	pub fn fallible<F, E>(container: Ct, on_render: F) -> Self
	where
		F: Fn(RenderProps<C, Ct>, &Ct) -> Result<C, E> + 'static,
		E: Into<RenderError>,
	{
		Self::from_render_fn(
			container,
			Rc::new(
				move |props: RenderProps<C, Ct>, container: &Ct| -> Result<C, RenderError> {
					on_render(props, container).map_err(Into::into)
				},
			),
		)
	}

	fn from_render_fn(container: Ct, on_render: RenderFn<C, Ct>) -> Self {
		Self {
			default_props: Props::new(),
			container,
			on_render,
			on_change: None,
		}
	}

	/// Sets the props every render starts from. URL props override them.
	pub fn with_default_props(mut self, props: Props) -> Self {
		self.default_props = props;
		self
	}

	/// Adds a single default prop.
	pub fn with_default_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.default_props.insert(key.into(), value.into());
		self
	}

	/// Sets the default props from any value serializing to a JSON object.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::NotAnObject`] if `value` serializes to anything
	/// other than an object, and [`ConfigError::Serialize`] if it fails to
	/// serialize.
	pub fn with_default_props_from<T: Serialize>(self, value: &T) -> Result<Self, ConfigError> {
		match serde_json::to_value(value)? {
			Value::Object(props) => Ok(self.with_default_props(props)),
			Value::Null => Err(ConfigError::NotAnObject("null")),
			Value::Bool(_) => Err(ConfigError::NotAnObject("a boolean")),
			Value::Number(_) => Err(ConfigError::NotAnObject("a number")),
			Value::String(_) => Err(ConfigError::NotAnObject("a string")),
			Value::Array(_) => Err(ConfigError::NotAnObject("an array")),
		}
	}

	/// Sets the callback notified after every successful render.
	pub fn on_change<F>(mut self, on_change: F) -> Self
	where
		F: Fn(&ParamsObject) + 'static,
	{
		self.on_change = Some(Rc::new(on_change));
		self
	}

	/// Returns the default props.
	pub fn default_props(&self) -> &Props {
		&self.default_props
	}

	/// Returns the render target.
	pub fn container(&self) -> &Ct {
		&self.container
	}

	/// Returns `true` if a change callback is set.
	pub fn has_on_change(&self) -> bool {
		self.on_change.is_some()
	}
}
