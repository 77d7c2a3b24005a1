//! Query string serialization
//!
//! This module provides access to wayline-query, the stateless converter
//! between a location's query string and the params a view renders from.
//!
//! ## Example
//!
//! ```rust
//! use wayline::query::{ParamsObject, parse_location, stringify_params};
//!
//! let params = ParamsObject::new("List").with_prop("dataUrl", "users.json");
//!
//! assert_eq!(
//! 	stringify_params(&params),
//! 	"?component=List&props=%7B%22dataUrl%22%3A%22users.json%22%7D"
//! );
//! assert_eq!(parse_location("mypage.com?component=List&dataUrl=users.json"), params);
//! ```

// Re-export all wayline-query functionality
pub use wayline_query::*;
