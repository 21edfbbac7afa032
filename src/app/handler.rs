//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes key input and
//! host results, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and `SearchState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `Submit`
//! - **Focus**: `CycleFocus`, `FocusQuery`, `CloseFocus`
//! - **Results**: `KeyDown`, `KeyUp`, `OpenSelected`
//! - **Pages**: `PageCursorLeft`, `PageCursorRight`, `ActivatePageLink`,
//!   `PageClicked`, `NextPage`, `PreviousPage`
//! - **Host**: `PermissionsResult`, `ResponseReceived`, `OpenFinished`
//!
//! # Example
//!
//! ```rust
//! use hn_search::app::{AppState, Event, handle_event};
//! use hn_search::search::SearchState;
//! use hn_search::ui::theme::Theme;
//!
//! let mut state = AppState::new(SearchState::default(), Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::Char('r'))?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), hn_search::SearchError>(())
//! ```

use crate::app::modes::Focus;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::search::{decode_response, FetchRequest, RequestId};

/// Events triggered by user input or host results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character from the query.
    Backspace,
    /// Submits the query, requesting its first page.
    Submit,

    /// Moves focus Query → Results → PageBar → Query.
    CycleFocus,
    /// Puts focus back on the query input.
    FocusQuery,
    /// Hides the plugin pane.
    CloseFocus,

    /// Moves the result selection down (wraps to top).
    KeyDown,
    /// Moves the result selection up (wraps to bottom).
    KeyUp,
    /// Opens the selected result's link.
    OpenSelected,

    /// Moves the page-bar cursor one link left.
    PageCursorLeft,
    /// Moves the page-bar cursor one link right.
    PageCursorRight,
    /// Requests the page of the link under the page-bar cursor.
    ActivatePageLink,
    /// Requests a page directly, as if its link was clicked.
    PageClicked(usize),
    /// Requests the page after the current one.
    NextPage,
    /// Requests the page before the current one.
    PreviousPage,

    /// Reports whether the host granted the requested permissions.
    PermissionsResult {
        granted: bool,
    },

    /// Carries the raw result of a search request sent by the host.
    ///
    /// `request_id` is read back from the request context; a response without
    /// one cannot be matched to a request and is dropped.
    ResponseReceived {
        request_id: Option<RequestId>,
        status: u16,
        body: Vec<u8>,
    },

    /// Reports the exit of the link opener.
    OpenFinished {
        exit_code: Option<i32>,
        stderr: String,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI should be re-rendered, plus the actions to execute
/// in order.
///
/// # Errors
///
/// Returns an error only if a request URL cannot be built from the configured
/// endpoint. The state is already `Errored` by then, so callers should log the
/// error and still render.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Char(c) => {
            state.search.query.push(*c);
            tracing::trace!(query = %state.search.query, char = %c, "query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.search.query.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![]))
        }
        Event::Submit => {
            state.notice = None;
            let query = state.search.query.clone();
            let request = state.search.submit(query);
            fetch(state, request)
        }
        Event::CycleFocus => {
            state.focus = state.focus.next();
            if state.focus == Focus::PageBar {
                state.sync_page_cursor();
            }
            tracing::debug!(focus = ?state.focus, "focus changed");
            Ok((true, vec![]))
        }
        Event::FocusQuery => {
            if state.focus == Focus::Query {
                return Ok((false, vec![]));
            }
            state.focus = Focus::Query;
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            let Some(result) = state.selected_result() else {
                tracing::debug!("no result selected");
                return Ok((false, vec![]));
            };

            tracing::debug!(result_id = %result.id, url = %result.url, "opening result");
            Ok((
                false,
                vec![Action::OpenUrl {
                    command: state.open_command.clone(),
                    url: result.url.clone(),
                }],
            ))
        }
        Event::PageCursorLeft => {
            state.move_page_cursor_left();
            Ok((true, vec![]))
        }
        Event::PageCursorRight => {
            state.move_page_cursor_right();
            Ok((true, vec![]))
        }
        Event::ActivatePageLink => {
            let Some(link) = state.page_link_under_cursor() else {
                return Ok((false, vec![]));
            };
            request_page(state, link.target())
        }
        Event::PageClicked(index) => request_page(state, *index),
        Event::NextPage => {
            state.notice = None;
            let request = state.search.next_page();
            fetch_optional(state, request)
        }
        Event::PreviousPage => {
            state.notice = None;
            let request = state.search.previous_page();
            fetch_optional(state, request)
        }
        Event::PermissionsResult { granted } => {
            if !*granted {
                tracing::warn!("web access permission denied");
                state.notice = Some("Web access permission was denied".to_string());
                return Ok((true, vec![]));
            }

            let Some(query) = state.initial_query.take() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(query = %query, "submitting initial query");
            let request = state.search.submit(query);
            fetch(state, request)
        }
        Event::ResponseReceived {
            request_id,
            status,
            body,
        } => {
            let Some(request_id) = request_id else {
                tracing::warn!(status = status, "response without request context, dropping");
                return Ok((false, vec![]));
            };

            let outcome = decode_response(*status, body);
            if state.search.resolve(*request_id, outcome) {
                state.sync_cursors();
                Ok((true, vec![]))
            } else {
                Ok((false, vec![]))
            }
        }
        Event::OpenFinished { exit_code, stderr } => {
            if *exit_code == Some(0) {
                return Ok((false, vec![]));
            }

            tracing::warn!(exit_code = ?exit_code, stderr = %stderr, "link opener failed");
            let detail = stderr.trim();
            state.notice = Some(if detail.is_empty() {
                format!("{} failed", state.open_command)
            } else {
                format!("{} failed: {detail}", state.open_command)
            });
            Ok((true, vec![]))
        }
    }
}

fn request_page(state: &mut AppState, index: usize) -> Result<(bool, Vec<Action>)> {
    state.notice = None;
    let request = state.search.go_to_page(index);
    fetch(state, request)
}

/// Turns a freshly issued request into a `Fetch` action.
///
/// A URL failure leaves the state `Errored` and is still rendered.
fn fetch(state: &mut AppState, request: Result<FetchRequest>) -> Result<(bool, Vec<Action>)> {
    state.sync_cursors();
    let request = request?;
    Ok((true, vec![Action::Fetch(request)]))
}

fn fetch_optional(state: &mut AppState, request: Result<Option<FetchRequest>>) -> Result<(bool, Vec<Action>)> {
    match request? {
        Some(request) => fetch(state, Ok(request)),
        None => Ok((false, vec![])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageLink;
    use crate::search::{RequestStatus, SearchState};
    use crate::ui::theme::Theme;

    fn state() -> AppState {
        AppState::new(SearchState::default(), Theme::default())
    }

    fn type_query(state: &mut AppState, query: &str) {
        for c in query.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn fetched(actions: &[Action]) -> FetchRequest {
        match actions {
            [Action::Fetch(request)] => request.clone(),
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn respond(state: &mut AppState, request: &FetchRequest, body: &str) -> bool {
        let (render, _) = handle_event(
            state,
            &Event::ResponseReceived {
                request_id: Some(request.id),
                status: 200,
                body: body.as_bytes().to_vec(),
            },
        )
        .unwrap();
        render
    }

    const ONE_HIT: &str =
        r#"{"nbPages":3,"hits":[{"objectID":"1","title":"Rust 1.0","url":"https://blog.rust-lang.org/"}]}"#;

    #[test]
    fn typing_then_submit_fetches_first_page() {
        let mut state = state();
        type_query(&mut state, "rust");

        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();

        assert!(render);
        let request = fetched(&actions);
        assert_eq!(request.page, 0);
        assert!(request.url.contains("query=rust"));
        assert!(state.search.is_loading());
    }

    #[test]
    fn search_flow_shows_results_and_page_window() {
        let mut state = state();
        type_query(&mut state, "rust");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let request = fetched(&actions);

        assert!(respond(&mut state, &request, ONE_HIT));

        assert_eq!(state.search.status, RequestStatus::Loaded);
        assert_eq!(state.search.results.len(), 1);
        assert_eq!(state.search.results[0].url, "https://blog.rust-lang.org/");
        assert_eq!(
            state.search.page_links(),
            vec![
                PageLink::Page { index: 0, active: true },
                PageLink::Page { index: 1, active: false },
                PageLink::Page { index: 2, active: false },
                PageLink::Last { index: 2 },
            ]
        );
    }

    #[test]
    fn page_bar_activation_requests_page_and_keeps_query() {
        let mut state = state();
        type_query(&mut state, "rust");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        respond(&mut state, &fetched(&actions), ONE_HIT);

        handle_event(&mut state, &Event::CycleFocus).unwrap();
        handle_event(&mut state, &Event::CycleFocus).unwrap();
        assert_eq!(state.focus, Focus::PageBar);
        handle_event(&mut state, &Event::PageCursorRight).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ActivatePageLink).unwrap();

        let request = fetched(&actions);
        assert_eq!(request.page, 1);
        assert!(request.url.ends_with("query=rust&page=1"));
        assert_eq!(state.search.page.current_index, 1);
    }

    #[test]
    fn edited_query_is_used_by_page_navigation() {
        let mut state = state();
        type_query(&mut state, "rust");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        respond(&mut state, &fetched(&actions), ONE_HIT);

        type_query(&mut state, "c");
        let (_, actions) = handle_event(&mut state, &Event::PageClicked(2)).unwrap();

        assert!(fetched(&actions).url.contains("query=rustc"));
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut state = state();
        type_query(&mut state, "rust");
        let (_, first) = handle_event(&mut state, &Event::Submit).unwrap();
        let (_, second) = handle_event(&mut state, &Event::PageClicked(1)).unwrap();

        let render = respond(&mut state, &fetched(&first), ONE_HIT);

        assert!(!render);
        assert!(state.search.is_loading());

        assert!(respond(
            &mut state,
            &fetched(&second),
            r#"{"nbPages":3,"hits":[]}"#
        ));
        assert_eq!(state.search.status, RequestStatus::Loaded);
        assert_eq!(state.search.page.current_index, 1);
    }

    #[test]
    fn failed_response_surfaces_error() {
        let mut state = state();
        type_query(&mut state, "rust");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let request = fetched(&actions);

        let (render, _) = handle_event(
            &mut state,
            &Event::ResponseReceived {
                request_id: Some(request.id),
                status: 503,
                body: vec![],
            },
        )
        .unwrap();

        assert!(render);
        assert_eq!(state.search.error(), Some("Request failed with status code 503"));
        assert!(state.search.page_links().is_empty());
    }

    #[test]
    fn response_without_context_is_dropped() {
        let mut state = state();
        let (render, actions) = handle_event(
            &mut state,
            &Event::ResponseReceived {
                request_id: None,
                status: 200,
                body: ONE_HIT.as_bytes().to_vec(),
            },
        )
        .unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.search.status, RequestStatus::Idle);
    }

    #[test]
    fn page_click_before_any_search_fetches_empty_query() {
        let mut state = state();

        let (render, actions) = handle_event(&mut state, &Event::PageClicked(2)).unwrap();

        assert!(render);
        let request = fetched(&actions);
        assert_eq!(request.page, 2);
        assert!(request.url.contains("query=&page=2"));
        assert_eq!(state.search.status, RequestStatus::Loading);
        assert_eq!(state.search.page.current_index, 2);
    }

    #[test]
    fn next_page_at_last_page_does_nothing() {
        let mut state = state();
        type_query(&mut state, "rust");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        respond(&mut state, &fetched(&actions), r#"{"nbPages":1,"hits":[]}"#);

        let (render, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn open_selected_uses_configured_command() {
        let mut state = state();
        state.open_command = "open".to_string();
        type_query(&mut state, "rust");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        respond(&mut state, &fetched(&actions), ONE_HIT);

        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();

        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                command: "open".to_string(),
                url: "https://blog.rust-lang.org/".to_string(),
            }]
        );
    }

    #[test]
    fn open_failure_sets_notice() {
        let mut state = state();
        let (render, _) = handle_event(
            &mut state,
            &Event::OpenFinished {
                exit_code: Some(3),
                stderr: "no browser\n".to_string(),
            },
        )
        .unwrap();

        assert!(render);
        assert_eq!(state.notice.as_deref(), Some("xdg-open failed: no browser"));
    }

    #[test]
    fn permission_grant_submits_initial_query_once() {
        let mut state = state();
        state.initial_query = Some("zellij".to_string());

        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert!(fetched(&actions).url.contains("query=zellij"));
        assert_eq!(state.search.query, "zellij");

        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn focus_cycles_and_returns_to_query() {
        let mut state = state();
        handle_event(&mut state, &Event::CycleFocus).unwrap();
        assert_eq!(state.focus, Focus::Results);
        handle_event(&mut state, &Event::FocusQuery).unwrap();
        assert_eq!(state.focus, Focus::Query);
    }
}
