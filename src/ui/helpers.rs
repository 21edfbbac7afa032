//! Shared rendering utilities.
//!
//! Text is measured and sliced by `char`, never by byte, so titles with
//! non-ASCII characters keep their columns aligned.

use crate::ui::theme::Theme;

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Splits `text` into `(section, highlighted)` runs according to `ranges`.
///
/// Ranges are `(start, end)` character indices with exclusive end, sorted and
/// non-overlapping. Out-of-bounds ends are clamped.
#[must_use]
pub fn highlight_segments(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }
        if start > current_pos {
            segments.push((chars[current_pos..start].iter().collect(), false));
        }
        segments.push((chars[start..end].iter().collect(), true));
        current_pos = end;
    }

    if current_pos < chars.len() {
        segments.push((chars[current_pos..].iter().collect(), false));
    }
    segments
}

/// Prints `text` with `ranges` in the match highlight colors.
///
/// Selected rows keep their selection colors throughout: match highlighting
/// would fight with the selection background.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    for (section, highlighted) in highlight_segments(text, ranges) {
        if highlighted {
            print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
            print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
            print!("{section}");
            print!("{}", Theme::reset());
            print!("{}", Theme::fg(&theme.colors.text_normal));
        } else {
            print!("{section}");
        }
    }
}

/// Prints `text` centered in `cols`, padding the rest of the line.
pub fn print_centered(text: &str, cols: usize) {
    let len = char_len(text).min(cols);
    let padding = cols.saturating_sub(len) / 2;
    print!("{}", " ".repeat(padding));
    print!("{}", text.chars().take(cols).collect::<String>());
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
}
