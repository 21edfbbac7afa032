//! Error types for the hn-search plugin.
//!
//! [`SearchError`] is the crate-wide error and [`Result`] its alias. Failures of
//! a single search request are modelled separately by [`FetchFailure`], because
//! they are never propagated: the query controller folds them into an
//! `Errored` status and the UI shows the message.

use thiserror::Error;

/// Message shown when a failed request carries no description of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// The main error type for hn-search plugin operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The configured search endpoint could not be turned into a request URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A specialized `Result` type for hn-search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Why a single search request did not produce a result page.
///
/// All variants collapse to one displayed string via [`FetchFailure::message`];
/// the UI does not distinguish between them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The host could not complete the request (DNS, connection, TLS...).
    ///
    /// Zellij reports these as a 400 result whose body, if any, is plain error
    /// text rather than JSON. An empty body becomes "Network Error".
    #[error("{0}")]
    Transport(String),

    /// The API answered with a non-success status code.
    #[error("Request failed with status code {0}")]
    Status(u16),

    /// The body was not the JSON shape the API promises.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchFailure {
    /// Human-readable message for display, never empty.
    #[must_use]
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}
