//! Client-side routing
//!
//! This module provides access to wayline-router: History API navigation
//! driven entirely by the query string.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wayline::router::{Router, RouterConfig};
//!
//! let config = RouterConfig::new("#app", |props, target: &&str| {
//! 	format!("{} props into {}", props.props.len(), target)
//! });
//!
//! let router = Router::new(config).unwrap();
//! router.go_to("/?component=List&dataUrl=users.json").unwrap();
//! ```

// Re-export all wayline-router functionality
pub use wayline_router::*;
