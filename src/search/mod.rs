//! Search request lifecycle.
//!
//! Replaces direct network access with Zellij's host-side `web_request`: the
//! controller decides what to fetch, the plugin shim sends it, and the result
//! comes back as an event that is decoded here.
//!
//! # Modules
//!
//! - `api`: Request URL construction and response decoding
//! - `context`: Request ids and trace context carried through the host
//! - `controller`: The query controller state machine

pub mod api;
pub mod context;
pub mod controller;

pub use api::{decode_response, ApiSettings, SearchResponse, DEFAULT_ENDPOINT};
pub use context::{RequestContext, RequestId, TraceContext};
pub use controller::{FetchRequest, PageState, RequestStatus, SearchState};
