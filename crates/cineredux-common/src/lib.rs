//! Cineredux-Common: Shared error types and constants.
//!
//! This crate provides functionality used across cineredux:
//!
//! - **Error Handling**: The gateway's error taxonomy and result alias
//! - **Constants**: Header names and default upstream endpoints
//!
//! # Examples
//!
//! ```
//! use cineredux_common::{Error, Result};
//!
//! fn check(query: Option<&str>) -> Result<&str> {
//!     query.ok_or_else(|| Error::missing_query())
//! }
//!
//! assert_eq!(check(None).unwrap_err().http_status(), 400);
//! ```

pub mod constants;
pub mod error;

pub use error::{Error, Result};
