//! Search API wire format.
//!
//! Builds request URLs for the Algolia Hacker News search endpoint and decodes
//! the host's web-request result (status code and raw body) into a
//! [`SearchResponse`] or a [`FetchFailure`].

use crate::domain::error::{FetchFailure, Result};
use crate::domain::Hit;
use serde::Deserialize;

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://hn.algolia.com/api/v1/search";

/// Status Zellij reports when the request never reached the server.
const HOST_TRANSPORT_FAILURE_STATUS: u16 = 400;

/// The subset of the API response the plugin consumes.
///
/// `nbPages` is trusted as-is. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "nbPages")]
    pub nb_pages: usize,
    pub hits: Vec<Hit>,
}

/// Endpoint settings used to build request URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Base search URL, without query string.
    pub endpoint: String,
    /// Optional `hitsPerPage` override. The API default applies when `None`.
    pub hits_per_page: Option<u32>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            hits_per_page: None,
        }
    }
}

impl ApiSettings {
    /// Builds the request URL for `query` at `page`.
    ///
    /// The query is form-encoded, so an empty query is sent as `query=`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Url`](crate::domain::SearchError::Url) if the
    /// configured endpoint is not an absolute URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use hn_search::search::ApiSettings;
    ///
    /// let url = ApiSettings::default().request_url("rust lang", 2).unwrap();
    /// assert_eq!(url, "http://hn.algolia.com/api/v1/search?query=rust+lang&page=2");
    /// ```
    pub fn request_url(&self, query: &str, page: usize) -> Result<String> {
        let page = page.to_string();
        let mut params = vec![("query", query.to_string()), ("page", page)];
        if let Some(hits_per_page) = self.hits_per_page {
            params.push(("hitsPerPage", hits_per_page.to_string()));
        }

        let url = url::Url::parse_with_params(&self.endpoint, &params)?;
        Ok(url.to_string())
    }
}

/// Decodes a web-request result into a response page.
///
/// # Classification
///
/// - 2xx with a body matching [`SearchResponse`]: success
/// - 2xx with any other body: [`FetchFailure::Malformed`]
/// - 400 whose body is not JSON: [`FetchFailure::Transport`] carrying the body
///   text, or "Network Error" when the body is empty (how Zellij reports a
///   request that failed before reaching the server)
/// - any other status: [`FetchFailure::Status`]
///
/// # Errors
///
/// Returns the [`FetchFailure`] describing why no page could be decoded.
pub fn decode_response(status: u16, body: &[u8]) -> std::result::Result<SearchResponse, FetchFailure> {
    if !(200..300).contains(&status) {
        if status == HOST_TRANSPORT_FAILURE_STATUS && serde_json::from_slice::<serde_json::Value>(body).is_err() {
            let detail = String::from_utf8_lossy(body).trim().to_string();
            let message = if detail.is_empty() { "Network Error".to_string() } else { detail };
            return Err(FetchFailure::Transport(message));
        }
        return Err(FetchFailure::Status(status));
    }

    serde_json::from_slice::<SearchResponse>(body).map_err(|e| FetchFailure::Malformed(e.to_string()))
}
