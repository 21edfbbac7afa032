//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host` inside the sandbox; paths from
//! the plugin configuration are translated here.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
