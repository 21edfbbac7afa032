//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`search`]: Query input box
//! - [`status`]: Loading indicator, error message or result summary
//! - [`results`]: Result link list
//! - [`pagination`]: Page-link bar
//! - [`empty`]: Placeholder for an empty result list
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Status line]
//! [Result rows | Empty state]
//! [Blank padding to fill screen]
//! [Page bar]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod pagination;
mod results;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use pagination::render_page_bar;
use results::render_result_rows;
use search::render_search_bar;
use status::render_status_line;

/// Renders a horizontal border line at `row`. Returns `row + 1`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout for `vm`.
///
/// The page bar, border and footer are pinned to the bottom three rows; the
/// result area takes whatever is left between them and the status line.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_status_line(current_row, vm, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        render_result_rows(current_row, &vm.result_items, theme, cols);
    }

    let footer_row = rows.max(current_row + 3);
    let border_row = footer_row - 1;
    let page_bar_row = footer_row - 2;

    render_page_bar(page_bar_row, &vm.page_bar, theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
