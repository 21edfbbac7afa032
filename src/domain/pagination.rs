//! Page-link window computation.
//!
//! Given the current page index and the total page count, [`page_window`]
//! returns the ordered sequence of page links to render: an optional
//! [`PageLink::First`] shortcut, up to seven numbered pages centred on the
//! current one, and an optional [`PageLink::Last`] shortcut.

/// Number of page links shown on each side of the current page.
pub const WINDOW_RADIUS: usize = 3;

/// One entry of the rendered page bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// Shortcut to page 0. Present only when the current page is not 0.
    First,

    /// A numbered page link.
    Page {
        /// Zero-based page index.
        index: usize,
        /// Whether this is the current page.
        active: bool,
    },

    /// Shortcut to the last page. Present only when a later page exists.
    Last {
        /// Zero-based index of the last page.
        index: usize,
    },
}

impl PageLink {
    /// The page index this link navigates to.
    #[must_use]
    pub const fn target(&self) -> usize {
        match *self {
            Self::First => 0,
            Self::Page { index, .. } | Self::Last { index } => index,
        }
    }

    /// Whether this link is the current page.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Page { active: true, .. })
    }
}

/// Computes the page links for `current` out of `total_pages`.
///
/// `total_pages` is trusted as given; `current` may exceed it, in which case
/// the window is clamped to the last page.
///
/// # Examples
///
/// ```
/// use hn_search::domain::pagination::{page_window, PageLink};
///
/// let links = page_window(0, 1);
/// assert_eq!(links, vec![PageLink::Page { index: 0, active: true }]);
/// ```
#[must_use]
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageLink> {
    let mut links = Vec::with_capacity(2 * WINDOW_RADIUS + 3);

    if current > 0 {
        links.push(PageLink::First);
    }

    if let Some(last_index) = total_pages.checked_sub(1) {
        let start = current.saturating_sub(WINDOW_RADIUS);
        let end = current.saturating_add(WINDOW_RADIUS).min(last_index);

        links.extend((start..=end).map(|index| PageLink::Page {
            index,
            active: index == current,
        }));

        if current < last_index {
            links.push(PageLink::Last { index: last_index });
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_indices(links: &[PageLink]) -> Vec<usize> {
        links
            .iter()
            .filter_map(|link| match link {
                PageLink::Page { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn middle_page_has_both_shortcuts() {
        let links = page_window(5, 20);

        assert_eq!(links.first(), Some(&PageLink::First));
        assert_eq!(links.last(), Some(&PageLink::Last { index: 19 }));
        assert_eq!(page_indices(&links), vec![2, 3, 4, 5, 6, 7, 8]);

        let active: Vec<usize> = links.iter().filter(|l| l.is_active()).map(PageLink::target).collect();
        assert_eq!(active, vec![5]);
    }

    #[test]
    fn single_page_has_no_shortcuts() {
        assert_eq!(page_window(0, 1), vec![PageLink::Page { index: 0, active: true }]);
    }

    #[test]
    fn no_pages_renders_nothing_on_first_page() {
        assert!(page_window(0, 0).is_empty());
    }

    #[test]
    fn first_page_of_many() {
        let links = page_window(0, 3);
        assert_eq!(
            links,
            vec![
                PageLink::Page { index: 0, active: true },
                PageLink::Page { index: 1, active: false },
                PageLink::Page { index: 2, active: false },
                PageLink::Last { index: 2 },
            ]
        );
    }

    #[test]
    fn last_page_omits_last_shortcut() {
        let links = page_window(9, 10);
        assert_eq!(links.first(), Some(&PageLink::First));
        assert!(!links.iter().any(|l| matches!(l, PageLink::Last { .. })));
        assert_eq!(page_indices(&links), vec![6, 7, 8, 9]);
    }

    #[test]
    fn window_never_exceeds_seven_pages() {
        for total in 0..30 {
            for current in 0..total {
                let count = page_indices(&page_window(current, total)).len();
                assert!(count <= 2 * WINDOW_RADIUS + 1, "current={current} total={total}");
            }
        }
    }

    #[test]
    fn current_beyond_total_is_clamped() {
        let links = page_window(5, 3);
        assert_eq!(links.first(), Some(&PageLink::First));
        assert_eq!(page_indices(&links), vec![2]);
        assert!(!links.iter().any(|l| matches!(l, PageLink::Last { .. })));
    }

    #[test]
    fn targets() {
        assert_eq!(PageLink::First.target(), 0);
        assert_eq!(PageLink::Last { index: 7 }.target(), 7);
        assert_eq!(PageLink::Page { index: 3, active: false }.target(), 3);
    }
}
