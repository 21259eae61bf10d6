//! Custom widgets
//!
//! - [`CardTrack`]: the horizontally scrolling, wrapping strip of cards
//! - [`ResultPanel`]: the winning card with its flavor line and actions

mod card_track;
mod result_panel;

pub use card_track::{CardTrack, CARD_HEIGHT};
pub use result_panel::ResultPanel;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Cut `text` to at most `max` columns, ending in `…` when shortened
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Write `text` starting at column `x` (relative to `area`, may be
/// negative) on row `y`, dropping whatever falls outside `area`
pub(crate) fn put_clipped(buf: &mut Buffer, area: Rect, x: i32, y: u16, text: &str, style: Style) {
    if y < area.y || y >= area.bottom() {
        return;
    }
    let width = i32::from(area.width);

    let mut col = x;
    let mut start = None;
    let mut visible = String::new();
    for ch in text.chars() {
        let w = i32::try_from(ch.width().unwrap_or(0)).unwrap_or(0);
        if col >= width {
            break;
        }
        if col >= 0 && col + w <= width {
            start.get_or_insert(col);
            visible.push(ch);
        }
        col += w;
    }

    if let Some(start) = start {
        // start is within 0..width, which fits in u16
        let start = u16::try_from(start).unwrap_or(0);
        buf.set_stringn(
            area.x + start,
            y,
            &visible,
            usize::from(area.width - start),
            style,
        );
    }
}
