//! Result list renderer.
//!
//! Each hit is one row: the title (a link to the hit's URL) on the left and
//! the source column (host, age, points) right-aligned.

use crate::ui::helpers::{self, char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ResultItem;

/// Renders `items` one per row starting at `row`.
///
/// Returns the next available row.
pub fn render_result_rows(row: usize, items: &[ResultItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_result_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single result row.
///
/// ```text
/// [marker] TITLE [padding] source
/// ```
///
/// Selection colors cover the whole row; otherwise the title is drawn in the
/// link color with query matches highlighted.
fn render_result_row(row: usize, item: &ResultItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("> ");
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  ");
    }

    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);

    let title_len = 2 + char_len(&item.title);
    let source_len = char_len(&item.source);
    let gap = cols.saturating_sub(title_len + source_len + 1).max(1);
    print!("{}", " ".repeat(gap));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", item.source);
    print!("{}", " ".repeat(cols.saturating_sub(title_len + gap + source_len)));

    print!("{}", Theme::reset());
    row + 1
}
