//! Error types for routing.

/// Error returned by a failed render callback.
pub type RenderError = Box<dyn std::error::Error>;

/// Error type for history backend operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
	/// No `window` object is available.
	#[error("No window object available")]
	NoWindow,
	/// `pushState` was rejected.
	#[error("pushState failed: {0}")]
	PushState(String),
	/// `replaceState` was rejected.
	#[error("replaceState failed: {0}")]
	ReplaceState(String),
	/// The popstate listener could not be registered.
	#[error("Failed to register popstate listener: {0}")]
	Listen(String),
}

/// Error type for router operations.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
	/// The render callback failed. The router state is left unchanged.
	#[error("Render failed: {0}")]
	Render(#[source] RenderError),
	/// The history backend rejected an operation.
	#[error("Navigation failed: {0}")]
	History(#[from] HistoryError),
}

/// Error type for router configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Default props did not serialize to a JSON object.
	#[error("Default props must serialize to a JSON object, got {0}")]
	NotAnObject(&'static str),
	/// Default props could not be serialized.
	#[error("Failed to serialize default props: {0}")]
	Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::error::Error as _;

	#[rstest]
	fn test_history_error_display() {
		assert_eq!(
			HistoryError::PushState("SecurityError".to_string()).to_string(),
			"pushState failed: SecurityError"
		);
		assert_eq!(HistoryError::NoWindow.to_string(), "No window object available");
	}

	#[rstest]
	fn test_router_error_render_keeps_source() {
		let err = RouterError::Render("component crashed".into());

		assert_eq!(err.to_string(), "Render failed: component crashed");
		assert_eq!(
			err.source().map(|source| source.to_string()),
			Some("component crashed".to_string())
		);
	}

	#[rstest]
	fn test_router_error_from_history() {
		let err: RouterError = HistoryError::ReplaceState("denied".to_string()).into();

		assert!(matches!(err, RouterError::History(HistoryError::ReplaceState(_))));
		assert_eq!(err.to_string(), "Navigation failed: replaceState failed: denied");
	}
}
