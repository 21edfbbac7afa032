//! Application state management and view model computation.
//!
//! [`AppState`] is the single state bundle of the plugin: the search state
//! (query, status, results, pages) plus the UI-only state around it (focus,
//! result selection, page-bar cursor, theme). The event handler mutates it;
//! `compute_viewmodel` turns a snapshot into a [`UIViewModel`].
//!
//! # View Model Computation
//!
//! Rows that do not fit the terminal are windowed around the selection, titles
//! are truncated to their column, and characters matching the submitted query
//! are highlighted with the Skim fuzzy matcher.

use super::modes::Focus;
use crate::domain::{PageLink, SearchResult};
use crate::search::{RequestStatus, SearchState};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, PageBarInfo, PageLinkItem, ResultItem, SearchBarInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::BTreeSet;

/// Default command used to open result links.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Rows taken by everything except the result list: blank line, header,
/// border, search box (3), status line, page bar, border, footer.
const CHROME_ROWS: usize = 10;

/// Width of the source column (host, age, points).
const SOURCE_COLUMN_WIDTH: usize = 32;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Query, request status, results and page state.
    pub search: SearchState,

    /// Which part of the UI receives key input.
    pub focus: Focus,

    /// Zero-based index of the selected row within `search.results`.
    pub selected_index: usize,

    /// Zero-based index of the cursor within the current page links.
    pub page_cursor: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Executable used to open result links.
    pub open_command: String,

    /// Query to submit once the plugin is allowed to make web requests.
    pub initial_query: Option<String>,

    /// Transient message unrelated to the search itself, e.g. a failed opener.
    pub notice: Option<String>,
}

impl AppState {
    /// Creates a new application state around `search`.
    #[must_use]
    pub fn new(search: SearchState, theme: Theme) -> Self {
        Self {
            search,
            focus: Focus::Query,
            selected_index: 0,
            page_cursor: 0,
            theme,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            initial_query: None,
            notice: None,
        }
    }

    /// Moves selection down by one row, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.search.results.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.search.results.len();
    }

    /// Moves selection up by one row, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.search.results.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.search.results.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.search.results.get(self.selected_index)
    }

    /// Moves the page-bar cursor one link left. Stops at the first link.
    pub fn move_page_cursor_left(&mut self) {
        self.page_cursor = self.page_cursor.saturating_sub(1);
    }

    /// Moves the page-bar cursor one link right. Stops at the last link.
    pub fn move_page_cursor_right(&mut self) {
        let link_count = self.search.page_links().len();
        if self.page_cursor + 1 < link_count {
            self.page_cursor += 1;
        }
    }

    /// The page link under the page-bar cursor.
    #[must_use]
    pub fn page_link_under_cursor(&self) -> Option<PageLink> {
        self.search.page_links().get(self.page_cursor).copied()
    }

    /// Resets the result selection and puts the page-bar cursor on the
    /// current page. Called whenever results or page state change.
    pub fn sync_cursors(&mut self) {
        self.selected_index = 0;
        self.sync_page_cursor();
    }

    /// Puts the page-bar cursor on the active link.
    pub fn sync_page_cursor(&mut self) {
        self.page_cursor = self
            .search
            .page_links()
            .iter()
            .position(PageLink::is_active)
            .unwrap_or(0);
    }

    /// Computes a renderable UI view model for a terminal of `rows` x `cols`.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Subtract UI chrome from `rows` to get the rows available for results
    /// 2. Center the window on the selected index
    /// 3. Shift the window back if it runs past the end of the list
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        let results = &self.search.results;

        let selected_index = self.selected_index.min(results.len().saturating_sub(1));
        let mut visible_start = selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(results.len());
        if visible_end - visible_start < available_rows && results.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let tokens = self.query_tokens();
        let matcher = if tokens.is_empty() { None } else { Some(SkimMatcherV2::default()) };
        let title_width = cols.saturating_sub(SOURCE_COLUMN_WIDTH + 2).max(8);
        let now = chrono::Utc::now().timestamp();

        let result_items = results[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, result)| {
                let is_selected = self.focus == Focus::Results && visible_start + relative_idx == selected_index;
                Self::compute_result_item(result, is_selected, title_width, now, matcher.as_ref(), &tokens)
            })
            .collect();

        UIViewModel {
            header: HeaderInfo {
                title: " Hacker News Search ".to_string(),
            },
            search_bar: SearchBarInfo {
                query: self.search.query.clone(),
                focused: self.focus == Focus::Query,
            },
            is_loading: self.search.is_loading(),
            error: self.search.error().map(str::to_string),
            status: self.compute_status(),
            result_items,
            page_bar: self.compute_page_bar(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
        }
    }

    fn compute_result_item(
        result: &SearchResult,
        is_selected: bool,
        title_width: usize,
        now: i64,
        matcher: Option<&SkimMatcherV2>,
        tokens: &[String],
    ) -> ResultItem {
        let title = truncate(&result.title, title_width);
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| compute_highlight_ranges(&title, tokens, m));

        let mut source_parts = Vec::new();
        if let Some(host) = result.host() {
            source_parts.push(host);
        }
        if let Some(age) = result.time_ago_at(now) {
            source_parts.push(age);
        }
        if let Some(points) = result.points {
            source_parts.push(format!("{points} pts"));
        }

        ResultItem {
            title,
            url: result.url.clone(),
            source: truncate(&source_parts.join(" · "), SOURCE_COLUMN_WIDTH),
            is_selected,
            highlight_ranges,
        }
    }

    /// Whitespace-separated, lowercased tokens of the query, used for
    /// highlighting. Empty while nothing has been loaded.
    fn query_tokens(&self) -> Vec<String> {
        if self.search.status != RequestStatus::Loaded {
            return vec![];
        }
        self.search.query.split_whitespace().map(str::to_lowercase).collect()
    }

    fn compute_status(&self) -> Option<String> {
        if let Some(notice) = &self.notice {
            return Some(notice.clone());
        }
        match self.search.status {
            RequestStatus::Loaded => {
                let page = self.search.page;
                Some(format!(
                    "{} results · page {} · {} pages",
                    self.search.results.len(),
                    page.current_index,
                    page.total_pages
                ))
            }
            RequestStatus::Idle | RequestStatus::Loading | RequestStatus::Errored(_) => None,
        }
    }

    fn compute_page_bar(&self) -> PageBarInfo {
        let focused = self.focus == Focus::PageBar;
        let links = self
            .search
            .page_links()
            .iter()
            .enumerate()
            .map(|(position, link)| PageLinkItem {
                label: match link {
                    PageLink::First => "«".to_string(),
                    PageLink::Last { .. } => "»".to_string(),
                    PageLink::Page { index, .. } => index.to_string(),
                },
                target: link.target(),
                is_active: link.is_active(),
                under_cursor: focused && position == self.page_cursor,
            })
            .collect();

        PageBarInfo { links, focused }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus {
            Focus::Query => "Enter: search  Tab: results  Ctrl+n/p: next/prev page  Esc: close",
            Focus::Results => "j/k: navigate  Enter/o: open  h/l: prev/next page  Tab: pages  /: edit query  q: quit",
            Focus::PageBar => "h/l: move  Enter: go to page  Tab/Esc: edit query",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.search.results.is_empty() {
            return None;
        }
        match self.search.status {
            RequestStatus::Idle => Some(EmptyState {
                message: "Search Hacker News".to_string(),
                subtitle: "Type a query and press Enter".to_string(),
            }),
            RequestStatus::Loaded => Some(EmptyState {
                message: "No results".to_string(),
                subtitle: "Try a different query".to_string(),
            }),
            RequestStatus::Loading | RequestStatus::Errored(_) => None,
        }
    }
}

/// Computes character ranges of `text` matched by any of `tokens`.
///
/// Match indices from every token are merged, then consecutive indices are
/// coalesced into `(start, end)` ranges with exclusive end.
fn compute_highlight_ranges(text: &str, tokens: &[String], matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let indices: BTreeSet<usize> = tokens
        .iter()
        .filter_map(|token| matcher.fuzzy_indices(text, token))
        .flat_map(|(_score, indices)| indices)
        .collect();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Truncates `text` to at most `max_chars` characters, ending in "..." when cut.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}
