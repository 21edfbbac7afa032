//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the hn-search library and the Zellij plugin
//! system: it maps Zellij events to library events, runs the event handler,
//! and performs the returned actions through the Zellij API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` (search) and `RunCommands` (opener)
//! 3. **Grant**: Submit `initial_query`, if configured
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → input events, interpreted by current focus
//! - `WebRequestResult` → `Event::ResponseReceived` (request id read from the
//!   echoed context)
//! - `RunCommandResult` → `Event::OpenFinished`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Next / previous page
//!
//! Query focus:
//! - Characters: Edit query
//! - `Enter`: Search
//! - `Tab`: Focus results
//! - `Esc`: Close plugin
//!
//! Results focus:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `Enter`/`o`: Open link
//! - `h`/`Left`, `l`/`Right`: Previous / next page
//! - `Tab`: Focus page bar
//! - `/`/`Esc`: Edit query
//! - `q`: Close plugin
//!
//! Page bar focus:
//! - `h`/`Left`, `l`/`Right`: Move cursor
//! - `Enter`: Go to page
//! - `Tab`/`Esc`: Edit query
//! - `q`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use hn_search::search::{FetchRequest, RequestContext};
use hn_search::{handle_event, Action, Config, Event, Focus};

register_plugin!(State);

/// Context key marking `run_command` calls made to open a link.
const OPEN_CONTEXT_KEY: &str = "open_url";

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: hn_search::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: hn_search::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing and state, requests
    /// permissions and subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        hn_search::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = hn_search::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, delegates to `handle_event`, executes the
    /// resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        // Joins the trace of the span that issued the request; held until
        // the response has been handled.
        let mut _trace_guard = None;

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                let request_context = RequestContext::from_map(&context);
                _trace_guard = request_context
                    .as_ref()
                    .and_then(|c| c.trace_context.as_ref())
                    .and_then(|trace| trace.attach());

                tracing::debug!(status = status, body_len = body.len(), context = ?request_context, "web request result");
                Event::ResponseReceived {
                    request_id: request_context.map(|c| c.request_id),
                    status,
                    body,
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                if !context.contains_key(OPEN_CONTEXT_KEY) {
                    return false;
                }
                Event::OpenFinished {
                    exit_code,
                    stderr: String::from_utf8_lossy(&stderr).into_owned(),
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    Self::execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                // The search state already carries the error message.
                tracing::warn!(error = %e, "error handling event");
                true
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        hn_search::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events according to focus.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, focus = ?self.app.focus, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::NextPage),
                BareKey::Char('p') => Some(Event::PreviousPage),
                _ => None,
            };
        }

        Some(match self.app.focus {
            Focus::Query => match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Tab => Event::CycleFocus,
                BareKey::Esc => Event::CloseFocus,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            Focus::Results => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Enter | BareKey::Char('o') => Event::OpenSelected,
                BareKey::Left | BareKey::Char('h') => Event::PreviousPage,
                BareKey::Right | BareKey::Char('l') => Event::NextPage,
                BareKey::Tab => Event::CycleFocus,
                BareKey::Esc | BareKey::Char('/') => Event::FocusQuery,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            },
            Focus::PageBar => match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Event::PageCursorLeft,
                BareKey::Right | BareKey::Char('l') => Event::PageCursorRight,
                BareKey::Enter => Event::ActivatePageLink,
                BareKey::Tab => Event::CycleFocus,
                BareKey::Esc | BareKey::Char('/') => Event::FocusQuery,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            },
        })
    }

    /// Sends a search request through the host, tagging it with its request
    /// id and the current trace context.
    #[tracing::instrument(level = "debug", skip(request), fields(request_id = %request.id, page = request.page))]
    fn send_request(request: &FetchRequest) {
        let context = RequestContext::capture(request.id, request.page);
        web_request(&request.url, HttpVerb::Get, BTreeMap::new(), vec![], context.to_map());
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(request) => Self::send_request(request),
            Action::OpenUrl { command, url } => {
                tracing::debug!(command = %command, url = %url, "opening link");
                let mut context = BTreeMap::new();
                context.insert(OPEN_CONTEXT_KEY.to_string(), url.clone());
                run_command(&[command.as_str(), url.as_str()], context);
            }
        }
    }
}
