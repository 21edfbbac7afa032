//! hn-search: a Zellij plugin for searching Hacker News.
//!
//! Type a query, press Enter, and the plugin asks the HN Algolia search API
//! for the first page of matching stories. Results are listed as links that
//! open in the browser. A page bar shows up to three pages either side of the
//! current one, plus shortcuts to the first and last page.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - key mapping, web_request, run_command            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌─────────────────────────┐   ┌───────────────────────┐
//! │ Search Layer (search/)  │   │ UI Layer (ui/)        │
//! │ - Request URLs          │   │ - Rendering           │
//! │ - Response decoding     │   │ - Theming             │
//! │ - Query controller      │   │ - Components          │
//! │ - Request ids / traces  │   │                       │
//! └─────────────────────────┘   └───────────────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure Layers                     │
//! │  - Error types, results, page window (domain/)      │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Search results, page window, error types
//! - [`search`]: Request construction, response decoding, query controller
//! - [`infrastructure`]: Sandbox paths
//! - [`ui`]: Terminal rendering with theme support
//! - `observability`: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/hn-search.wasm" {
//!         endpoint "http://hn.algolia.com/api/v1/search"
//!         hits_per_page "30"
//!         open_command "xdg-open"
//!         initial_query "rust"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Request Flow
//!
//! 1. `Submit` (or a page link) moves the controller to `Loading` and emits
//!    `Action::Fetch` with a fresh request id
//! 2. The shim sends it with `web_request`, carrying the id and trace context
//!    in the request context map
//! 3. The host answers with `WebRequestResult`; the shim turns it into
//!    `Event::ResponseReceived`
//! 4. The controller applies it only if the id is still the latest one
//!
//! # Example
//!
//! ```rust
//! use hn_search::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for c in "rust".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), hn_search::SearchError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod search;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Focus};
pub use domain::{FetchFailure, PageLink, Result, SearchError, SearchResult};
pub use search::{ApiSettings, RequestContext, SearchState};
pub use ui::Theme;

use app::state::DEFAULT_OPEN_COMMAND;
use search::DEFAULT_ENDPOINT;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Search endpoint. Default: the HN Algolia search API.
    pub endpoint: String,

    /// Sent as `hitsPerPage` when set; otherwise the API default applies.
    pub hits_per_page: Option<u32>,

    /// Executable that opens result links. Default: `xdg-open`.
    pub open_command: String,

    /// Query submitted as soon as web access is granted.
    pub initial_query: Option<String>,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` refers to the host home.
    pub theme_file: Option<String>,

    /// `trace`, `debug`, `info`, `warn` or `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            hits_per_page: None,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            initial_query: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as absent and unparsable numbers fall back to their
    /// default.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use hn_search::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("hits_per_page".to_string(), "50".to_string());
    /// map.insert("open_command".to_string(), "open".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.hits_per_page, Some(50));
    /// assert_eq!(config.open_command, "open");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let defaults = Self::default();

        Self {
            endpoint: value("endpoint").unwrap_or(defaults.endpoint),
            hits_per_page: value("hits_per_page").and_then(|s| s.parse::<u32>().ok()).filter(|n| *n > 0),
            open_command: value("open_command").unwrap_or(defaults.open_command),
            initial_query: value("initial_query"),
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
        }
    }

    fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            endpoint: self.endpoint.clone(),
            hits_per_page: self.hits_per_page,
        }
    }

    /// Theme from `theme_file`, else `theme_name`, else the default. Failures
    /// are logged and fall back to the default.
    fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the initial `AppState` for `config`: idle search, query focused,
/// theme loaded. Nothing is requested until permissions are granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, "initializing hn-search plugin");

    let mut state = AppState::new(SearchState::new(config.api_settings()), config.load_theme());
    state.open_command.clone_from(&config.open_command);
    state.initial_query.clone_from(&config.initial_query);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("endpoint", "https://example.test/search"),
            ("hits_per_page", "25"),
            ("open_command", "open"),
            ("initial_query", "zellij"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.endpoint, "https://example.test/search");
        assert_eq!(config.hits_per_page, Some(25));
        assert_eq!(config.open_command, "open");
        assert_eq!(config.initial_query.as_deref(), Some("zellij"));
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn blank_and_invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("endpoint", "  "),
            ("hits_per_page", "lots"),
            ("initial_query", ""),
        ]));

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.hits_per_page, None);
        assert_eq!(config.initial_query, None);
        assert_eq!(Config::from_zellij(&map(&[("hits_per_page", "0")])).hits_per_page, None);
    }

    #[test]
    fn initialize_applies_config() {
        let config = Config {
            open_command: "open".to_string(),
            initial_query: Some("rust".to_string()),
            theme_name: Some("catppuccin-frappe".to_string()),
            hits_per_page: Some(5),
            ..Config::default()
        };

        let mut state = initialize(&config);

        assert_eq!(state.open_command, "open");
        assert_eq!(state.initial_query.as_deref(), Some("rust"));
        assert_eq!(state.theme.name, "catppuccin-frappe");
        let request = state.search.submit("x").unwrap();
        assert!(request.url.ends_with("hitsPerPage=5"));
    }

    #[test]
    fn theme_file_wins_over_name_and_bad_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let latte = include_str!("../themes/catppuccin-latte.toml");
        file.write_all(latte.replace("catppuccin-latte", "from-file").as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-frappe".to_string()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "from-file");

        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme(), Theme::default());

        let config = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme(), Theme::default());
    }
}
