//! Page-link bar renderer.
//!
//! ```text
//!   «  2  3  4  [5]  6  7  8  »
//! ```
//!
//! The active page is bold and bracketed. While the bar has focus, the link
//! under the cursor is drawn in the selection colors.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PageBarInfo, PageLinkItem};

/// Label as drawn, including the brackets around the active page.
fn link_text(link: &PageLinkItem) -> String {
    if link.is_active {
        format!("[{}]", link.label)
    } else {
        link.label.clone()
    }
}

/// Total width of the bar: labels joined by two spaces.
fn bar_width(links: &[PageLinkItem]) -> usize {
    let labels: usize = links.iter().map(|link| char_len(&link_text(link))).sum();
    labels + 2 * links.len().saturating_sub(1)
}

/// Renders the page bar centered at `row`. Renders a blank line when there
/// are no pages.
pub fn render_page_bar(row: usize, bar: &PageBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let width = bar_width(&bar.links);
    let padding = cols.saturating_sub(width) / 2;
    print!("{}", " ".repeat(padding));

    for (position, link) in bar.links.iter().enumerate() {
        if position > 0 {
            print!("  ");
        }

        if link.under_cursor {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else if link.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.active_page_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.link_fg));
        }
        print!("{}", link_text(link));
        print!("{}", Theme::reset());
    }

    print!("{}", " ".repeat(cols.saturating_sub(padding + width)));
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(label: &str, is_active: bool) -> PageLinkItem {
        PageLinkItem {
            label: label.to_string(),
            target: 0,
            is_active,
            under_cursor: false,
        }
    }

    #[test]
    fn active_page_is_bracketed() {
        assert_eq!(link_text(&link("5", true)), "[5]");
        assert_eq!(link_text(&link("»", false)), "»");
    }

    #[test]
    fn width_counts_chars_and_separators() {
        // "«  4  [5]  »"
        let links = vec![link("«", false), link("4", false), link("5", true), link("»", false)];
        assert_eq!(bar_width(&links), 12);
        assert_eq!(bar_width(&[]), 0);
    }
}
