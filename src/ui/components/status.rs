//! Status line renderer: loading indicator, error message or result summary.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

const STATUS_INDENT: usize = 2;

/// Renders the line under the search box.
///
/// Loading wins over an error, an error wins over the summary line.
pub fn render_status_line(row: usize, vm: &UIViewModel, theme: &Theme, cols: usize) -> usize {
    let (color, text) = if vm.is_loading {
        (&theme.colors.link_fg, "Loading...".to_string())
    } else if let Some(error) = &vm.error {
        (&theme.colors.error_fg, error.clone())
    } else if let Some(status) = &vm.status {
        (&theme.colors.text_dim, status.clone())
    } else {
        (&theme.colors.text_dim, String::new())
    };

    let width = cols.saturating_sub(STATUS_INDENT);
    let text: String = text.chars().take(width).collect();

    position_cursor(row, 1);
    print!("{}", " ".repeat(STATUS_INDENT));
    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", " ".repeat(width.saturating_sub(char_len(&text))));
    print!("{}", Theme::reset());
    row + 1
}
