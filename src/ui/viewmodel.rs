//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry display-ready data only: the query text, the
//! loading flag, the error message, the result rows and the page-link bar.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub search_bar: SearchBarInfo,

    /// Whether a request is outstanding.
    pub is_loading: bool,

    /// Message of the latest failed request.
    pub error: Option<String>,

    /// One-line status shown under the search bar when not loading and no
    /// error is present (result summary or a transient notice).
    pub status: Option<String>,

    /// Result rows in the visible window, in API order.
    pub result_items: Vec<ResultItem>,

    pub page_bar: PageBarInfo,

    pub footer: FooterInfo,

    /// Shown in place of the result list when there is nothing to list.
    pub empty_state: Option<EmptyState>,
}

/// Display information for a single result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    /// Title, truncated to the title column.
    pub title: String,

    /// Full link target.
    pub url: String,

    /// Secondary column: host, age and points.
    pub source: String,

    pub is_selected: bool,

    /// Character ranges of `title` matching the query, `(start, end)` with
    /// exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current focus.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search input display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether key input goes to the query.
    pub focused: bool,
}

/// Page-link bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBarInfo {
    pub links: Vec<PageLinkItem>,
    /// Whether key input goes to the page bar.
    pub focused: bool,
}

/// One rendered page link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinkItem {
    /// `«`, `»` or the page index.
    pub label: String,
    /// Page index activated by this link.
    pub target: usize,
    /// Whether this link is the current page.
    pub is_active: bool,
    /// Whether the page-bar cursor is on this link.
    pub under_cursor: bool,
}
