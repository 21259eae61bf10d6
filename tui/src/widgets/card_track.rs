//! Card Track Widget
//!
//! Draws the visible cards side by side and scrolls them by the offset the
//! wheel sends. The strip repeats endlessly, so an offset several laps long
//! still lands on the right card.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use super::{put_clipped, truncate};
use crate::display::DisplayCard;
use crate::theme::{card_look, CardLook};

/// Rows a card occupies, borders included
pub const CARD_HEIGHT: u16 = 7;

const LIGHT: [&str; 6] = ["┌", "─", "┐", "│", "└", "┘"];
const HEAVY: [&str; 6] = ["┏", "━", "┓", "┃", "┗", "┛"];

/// A wrapping strip of cards
pub struct CardTrack<'a> {
    cards: Vec<&'a DisplayCard>,
    offset: f32,
    card_width: u16,
    gap: u16,
}

impl<'a> CardTrack<'a> {
    /// Create a track from the cards to show, in order
    pub fn new(cards: impl IntoIterator<Item = &'a DisplayCard>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            offset: 0.0,
            card_width: 24,
            gap: 2,
        }
    }

    /// Scroll offset in cells
    #[must_use]
    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Card width and gap in cells
    #[must_use]
    pub fn geometry(mut self, card_width: u16, gap: u16) -> Self {
        self.card_width = card_width.max(4);
        self.gap = gap;
        self
    }

    fn draw_card(&self, buf: &mut Buffer, area: Rect, x: i32, card: &DisplayCard) {
        let CardLook { border, text, heavy } = card_look(card.emphasis);
        let glyphs = if heavy { HEAVY } else { LIGHT };
        let w = i32::from(self.card_width);
        let inner = usize::from(self.card_width - 2);
        let top = area.y;
        let bottom = area.y + CARD_HEIGHT - 1;

        let horizontal = glyphs[1].repeat(inner);
        let top_edge = format!("{}{horizontal}{}", glyphs[0], glyphs[2]);
        let bottom_edge = format!("{}{horizontal}{}", glyphs[4], glyphs[5]);
        put_clipped(buf, area, x, top, &top_edge, border);
        put_clipped(buf, area, x, bottom, &bottom_edge, border);
        for y in top + 1..bottom {
            put_clipped(buf, area, x, y, glyphs[3], border);
            put_clipped(buf, area, x + w - 1, y, glyphs[3], border);
        }

        let mut lines: Vec<(String, Style)> = textwrap::wrap(&card.name, inner.max(1))
            .into_iter()
            .take(2)
            .map(|line| (line.into_owned(), text))
            .collect();
        while lines.len() < 2 {
            lines.push((String::new(), text));
        }
        lines.push((String::new(), text));
        lines.push((card.meta.clone(), text));
        if !card.image_alt.is_empty() {
            lines.push((
                format!("[{}]", card.image_alt),
                text.add_modifier(Modifier::ITALIC),
            ));
        }

        for (row, (line, style)) in (top + 1..bottom).zip(lines) {
            let line = truncate(&line, inner);
            let pad = (inner - line.width()) / 2;
            let pad = i32::try_from(pad).unwrap_or(0);
            put_clipped(buf, area, x + 1 + pad, row, &line, style);
        }
    }
}

impl Widget for CardTrack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cards.is_empty() || area.width == 0 || area.height < CARD_HEIGHT {
            return;
        }

        let area = Rect {
            height: CARD_HEIGHT,
            ..area
        };
        let pitch = f32::from(self.card_width + self.gap);
        let lap = pitch * self.cards.len() as f32;
        let shift = self.offset.rem_euclid(lap);
        let width = f32::from(area.width);

        let mut k = 0_usize;
        loop {
            let left = k as f32 * pitch - shift;
            if left >= width {
                break;
            }
            if left + f32::from(self.card_width) > 0.0 {
                #[allow(clippy::cast_possible_truncation)]
                let x = left.round() as i32;
                self.draw_card(buf, area, x, self.cards[k % self.cards.len()]);
            }
            k += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheel_core::{CardEmphasis, ItemId, TrackGeometry};

    fn card(id: usize, name: &str) -> DisplayCard {
        DisplayCard {
            id: ItemId(id),
            name: name.to_string(),
            meta: String::new(),
            image_alt: String::new(),
            visible: true,
            emphasis: CardEmphasis::Normal,
        }
    }

    fn cells(buf: &Buffer, y: u16, columns: std::ops::Range<u16>) -> String {
        columns.map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn test_centered_card_lands_in_middle() {
        let cards = [card(0, "Pancakes"), card(1, "Oats"), card(2, "Bagel")];
        let geometry = TrackGeometry::new(10.0, 2.0, 40.0);
        let area = Rect::new(0, 0, 40, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);

        CardTrack::new(cards.iter())
            .geometry(10, 2)
            .offset(geometry.centered_offset(1))
            .render(area, &mut buf);

        // The centered card spans columns 15..25
        assert_eq!(cells(&buf, 1, 15..25), "│  Oats  │");
    }

    #[test]
    fn test_track_wraps_after_a_lap() {
        let cards = [card(0, "A"), card(1, "B")];
        let area = Rect::new(0, 0, 30, CARD_HEIGHT);

        let mut at_zero = Buffer::empty(area);
        CardTrack::new(cards.iter())
            .geometry(8, 2)
            .render(area, &mut at_zero);

        let mut one_lap = Buffer::empty(area);
        CardTrack::new(cards.iter())
            .geometry(8, 2)
            .offset(20.0 * 3.0)
            .render(area, &mut one_lap);

        assert_eq!(at_zero, one_lap);
    }

    #[test]
    fn test_winner_gets_heavy_border() {
        let mut winner = card(0, "Oats");
        winner.emphasis = CardEmphasis::Winner;
        let cards = [winner];
        let area = Rect::new(0, 0, 10, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        CardTrack::new(cards.iter()).geometry(10, 0).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "┏");
    }

    #[test]
    fn test_empty_track_draws_nothing() {
        let area = Rect::new(0, 0, 10, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        CardTrack::new(std::iter::empty()).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
