//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them in order; nothing in the library performs I/O.

use crate::search::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a search request through the host.
    ///
    /// The response arrives later as [`Event::ResponseReceived`](crate::Event::ResponseReceived)
    /// carrying the same request id.
    Fetch(FetchRequest),

    /// Opens a result link with the configured opener command.
    OpenUrl {
        /// Opener executable, e.g. `xdg-open`.
        command: String,
        /// Link to open.
        url: String,
    },
}
