//! Domain layer for the hn-search plugin.
//!
//! Core types and pure logic, independent of Zellij APIs.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`result`]: Raw API hits and normalized search results
//! - [`pagination`]: Page-link window computation

pub mod error;
pub mod pagination;
pub mod result;

pub use error::{FetchFailure, Result, SearchError, UNKNOWN_ERROR_MESSAGE};
pub use pagination::{page_window, PageLink};
pub use result::{normalize_hits, Hit, SearchResult};
