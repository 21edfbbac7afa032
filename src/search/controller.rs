//! Query controller: the request/response/pagination state machine.
//!
//! [`SearchState`] owns the query text, page state, request status and result
//! list. Issuing a fetch ([`SearchState::submit`], [`SearchState::go_to_page`])
//! moves to `Loading` and returns a [`FetchRequest`] for the runtime to send.
//! Results come back through [`SearchState::resolve`].
//!
//! # Superseded requests
//!
//! Requests are never cancelled. Every issued request gets a fresh
//! [`RequestId`] and only the response carrying the latest id is applied;
//! anything older is dropped when it arrives, whatever the arrival order.

use crate::domain::error::{FetchFailure, Result};
use crate::domain::{normalize_hits, page_window, PageLink, SearchResult};
use crate::search::api::{ApiSettings, SearchResponse};
use crate::search::context::RequestId;

/// Lifecycle of the most recent request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestStatus {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// A request is outstanding.
    Loading,
    /// The latest request succeeded.
    Loaded,
    /// The latest request failed; the message is ready for display.
    Errored(String),
}

/// Current page index and total page count as reported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageState {
    pub current_index: usize,
    pub total_pages: usize,
}

/// A request the runtime must send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub url: String,
    pub page: usize,
}

/// The search state bundle.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Query text. Edited per keystroke, replaced by [`SearchState::submit`],
    /// never touched by [`SearchState::go_to_page`].
    pub query: String,

    pub status: RequestStatus,

    /// Results of the latest successful response, replaced wholesale.
    pub results: Vec<SearchResult>,

    pub page: PageState,

    api: ApiSettings,

    /// Id of the most recently issued request.
    latest_request: RequestId,
}

impl SearchState {
    #[must_use]
    pub fn new(api: ApiSettings) -> Self {
        Self {
            query: String::new(),
            status: RequestStatus::Idle,
            results: Vec::new(),
            page: PageState::default(),
            api,
            latest_request: RequestId::default(),
        }
    }

    /// Stores `query` and requests its first page.
    ///
    /// # Errors
    ///
    /// Returns an error if no request URL can be built from the configured
    /// endpoint. The state is then `Errored` and nothing is in flight.
    pub fn submit(&mut self, query: impl Into<String>) -> Result<FetchRequest> {
        self.query = query.into();
        tracing::debug!(query = %self.query, "query submitted");
        self.issue(0)
    }

    /// Requests page `index` of the stored query.
    ///
    /// # Errors
    ///
    /// Same as [`SearchState::submit`].
    pub fn go_to_page(&mut self, index: usize) -> Result<FetchRequest> {
        tracing::debug!(page = index, query = %self.query, "page requested");
        self.issue(index)
    }

    /// Requests the page after the current one, if there is one.
    ///
    /// # Errors
    ///
    /// Same as [`SearchState::submit`].
    pub fn next_page(&mut self) -> Result<Option<FetchRequest>> {
        let next = self.page.current_index + 1;
        if next >= self.page.total_pages {
            return Ok(None);
        }
        self.go_to_page(next).map(Some)
    }

    /// Requests the page before the current one, if there is one.
    ///
    /// # Errors
    ///
    /// Same as [`SearchState::submit`].
    pub fn previous_page(&mut self) -> Result<Option<FetchRequest>> {
        match self.page.current_index.checked_sub(1) {
            Some(previous) => self.go_to_page(previous).map(Some),
            None => Ok(None),
        }
    }

    /// Applies the outcome of request `id`.
    ///
    /// Returns `false` and leaves the state untouched if `id` is not the most
    /// recently issued request.
    pub fn resolve(&mut self, id: RequestId, outcome: std::result::Result<SearchResponse, FetchFailure>) -> bool {
        if id != self.latest_request {
            tracing::debug!(
                request_id = %id,
                latest_request_id = %self.latest_request,
                "dropping response for superseded request"
            );
            return false;
        }

        match outcome {
            Ok(response) => self.apply_response(response),
            Err(failure) => self.apply_failure(&failure),
        }
        true
    }

    /// Page links for the current page state.
    #[must_use]
    pub fn page_links(&self) -> Vec<PageLink> {
        page_window(self.page.current_index, self.page.total_pages)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            RequestStatus::Errored(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub const fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    fn issue(&mut self, page: usize) -> Result<FetchRequest> {
        let url = match self.api.request_url(&self.query, page) {
            Ok(url) => url,
            Err(e) => {
                self.apply_failure(&FetchFailure::Transport(e.to_string()));
                return Err(e);
            }
        };

        self.latest_request = self.latest_request.next();
        self.page.current_index = page;
        self.status = RequestStatus::Loading;
        self.results.clear();

        tracing::info!(request_id = %self.latest_request, url = %url, "issuing search request");

        Ok(FetchRequest {
            id: self.latest_request,
            url,
            page,
        })
    }

    fn apply_response(&mut self, response: SearchResponse) {
        self.page.total_pages = response.nb_pages;
        self.results = normalize_hits(&response.hits, self.page.current_index);
        self.status = RequestStatus::Loaded;

        tracing::debug!(
            page = self.page.current_index,
            total_pages = self.page.total_pages,
            result_count = self.results.len(),
            "search response applied"
        );
    }

    fn apply_failure(&mut self, failure: &FetchFailure) {
        let message = failure.message();
        tracing::warn!(error = %message, "search request failed");

        self.status = RequestStatus::Errored(message);
        self.page = PageState::default();
        self.results.clear();
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(ApiSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Hit;
    use crate::domain::UNKNOWN_ERROR_MESSAGE;

    fn response(nb_pages: usize, titles: &[&str]) -> SearchResponse {
        SearchResponse {
            nb_pages,
            hits: titles
                .iter()
                .map(|title| Hit {
                    title: Some((*title).to_string()),
                    url: Some(format!("https://{title}.example")),
                    ..Hit::default()
                })
                .collect(),
        }
    }

    #[test]
    fn submit_resets_page_and_enters_loading() {
        let mut state = SearchState::default();
        state.page = PageState { current_index: 4, total_pages: 10 };
        state.status = RequestStatus::Errored("old".to_string());

        let request = state.submit("rust").unwrap();

        assert_eq!(request.page, 0);
        assert!(request.url.ends_with("?query=rust&page=0"));
        assert_eq!(state.page.current_index, 0);
        assert!(state.is_loading());
        assert!(state.error().is_none());
        assert!(state.results.is_empty());
    }

    #[test]
    fn go_to_page_keeps_query() {
        let mut state = SearchState::default();
        let first = state.submit("rust").unwrap();
        assert!(state.resolve(first.id, Ok(response(5, &["a"]))));

        let request = state.go_to_page(3).unwrap();

        assert_eq!(state.query, "rust");
        assert_eq!(request.page, 3);
        assert!(request.url.ends_with("?query=rust&page=3"));
        assert_eq!(state.page.current_index, 3);
        assert_eq!(state.page.total_pages, 5);
        assert!(state.is_loading());
    }

    #[test]
    fn success_replaces_results() {
        let mut state = SearchState::default();
        let request = state.submit("rust").unwrap();

        assert!(state.resolve(request.id, Ok(response(2, &["one", "two"]))));

        assert_eq!(state.status, RequestStatus::Loaded);
        assert_eq!(state.page.total_pages, 2);
        assert_eq!(state.results.len(), 2);

        let request = state.go_to_page(1).unwrap();
        state.resolve(request.id, Ok(response(2, &["three"])));
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].title, "three");
    }

    #[test]
    fn failure_resets_pages_and_results() {
        let mut state = SearchState::default();
        let request = state.submit("rust").unwrap();
        state.resolve(request.id, Ok(response(20, &["a", "b"])));
        let request = state.go_to_page(7).unwrap();

        assert!(state.resolve(request.id, Err(FetchFailure::Status(500))));

        assert_eq!(state.page, PageState::default());
        assert!(state.results.is_empty());
        assert_eq!(state.error(), Some("Request failed with status code 500"));
        assert_eq!(state.query, "rust");
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let mut state = SearchState::default();
        let request = state.submit("rust").unwrap();
        state.resolve(request.id, Err(FetchFailure::Transport(String::new())));
        assert_eq!(state.error(), Some(UNKNOWN_ERROR_MESSAGE));
    }

    #[test]
    fn superseded_response_is_dropped() {
        let mut state = SearchState::default();
        let old = state.submit("rust").unwrap();
        let new = state.submit("zig").unwrap();

        assert!(state.resolve(new.id, Ok(response(1, &["zig"]))));
        assert!(!state.resolve(old.id, Ok(response(9, &["rust"]))));

        assert_eq!(state.results[0].title, "zig");
        assert_eq!(state.page.total_pages, 1);
    }

    #[test]
    fn superseded_failure_is_dropped() {
        let mut state = SearchState::default();
        let old = state.submit("rust").unwrap();
        let new = state.go_to_page(2).unwrap();

        assert!(!state.resolve(old.id, Err(FetchFailure::Status(502))));
        assert!(state.is_loading());
        assert_eq!(state.page.current_index, 2);

        assert!(state.resolve(new.id, Ok(response(3, &["a"]))));
        assert_eq!(state.status, RequestStatus::Loaded);
    }

    #[test]
    fn repeated_submit_is_idempotent() {
        let mut once = SearchState::default();
        let request = once.submit("rust").unwrap();
        once.resolve(request.id, Ok(response(3, &["a", "b"])));

        let mut twice = SearchState::default();
        let request = twice.submit("rust").unwrap();
        twice.resolve(request.id, Ok(response(3, &["a", "b"])));
        let request = twice.submit("rust").unwrap();
        twice.resolve(request.id, Ok(response(3, &["a", "b"])));

        assert_eq!(once.query, twice.query);
        assert_eq!(once.status, twice.status);
        assert_eq!(once.results, twice.results);
        assert_eq!(once.page, twice.page);
    }

    #[test]
    fn next_and_previous_respect_bounds() {
        let mut state = SearchState::default();
        let request = state.submit("rust").unwrap();
        state.resolve(request.id, Ok(response(2, &["a"])));

        assert!(state.previous_page().unwrap().is_none());
        let next = state.next_page().unwrap().unwrap();
        assert_eq!(next.page, 1);
        state.resolve(next.id, Ok(response(2, &["b"])));
        assert!(state.next_page().unwrap().is_none());
        assert_eq!(state.previous_page().unwrap().map(|r| r.page), Some(0));
    }

    #[test]
    fn invalid_endpoint_errors_without_issuing() {
        let mut state = SearchState::new(ApiSettings {
            endpoint: "relative/path".to_string(),
            hits_per_page: None,
        });

        assert!(state.submit("rust").is_err());
        assert!(state.error().is_some());
        assert_eq!(state.latest_request(), RequestId::default());
    }
}
