//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the search/UI layers:
//!
//! ```text
//! Key/Host Event → Event Handler → State Mutations → Actions → Side Effects
//!        ↑                                                │
//!        └────────────── web request results ─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input focus
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::Focus;
pub use state::AppState;
