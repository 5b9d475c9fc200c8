//! HTTP access to the taskboard server

#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "native")]
pub use native::*;

/// Header carrying the session user on every request
pub const SESSION_HEADER: &str = "x-taskboard-session";
