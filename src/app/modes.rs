//! Input focus state for the application.
//!
//! Focus decides how keys are interpreted: typed into the query, used to
//! move through results, or used to move across the page bar.

/// Which part of the UI receives key input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Typing into the query input. Enter submits.
    #[default]
    Query,

    /// Navigating the result list. Enter opens the selected link.
    Results,

    /// Navigating the page-link bar. Enter activates the link under the cursor.
    PageBar,
}

impl Focus {
    /// The focus reached by pressing Tab.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Query => Self::Results,
            Self::Results => Self::PageBar,
            Self::PageBar => Self::Query,
        }
    }
}
