//! Result Panel Widget

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget, Wrap};
use wheel_core::ResultCard;

use crate::theme;

/// The winning card, its flavor line and the share / spin-again actions
pub struct ResultPanel<'a> {
    card: &'a ResultCard,
    copied: bool,
    faded: bool,
}

impl<'a> ResultPanel<'a> {
    /// Create a panel for `card`
    pub fn new(card: &'a ResultCard) -> Self {
        Self {
            card,
            copied: false,
            faded: false,
        }
    }

    /// Show "✓ Copied!" in place of the share action
    #[must_use]
    pub fn copied(mut self, copied: bool) -> Self {
        self.copied = copied;
        self
    }

    /// Draw dimmed (the panel is on its way out)
    #[must_use]
    pub fn faded(mut self, faded: bool) -> Self {
        self.faded = faded;
        self
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let base = if self.faded {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };

        let share = if self.copied {
            Span::styled("✓ Copied!", base.fg(theme::SUCCESS_GREEN))
        } else {
            Span::styled("[s] Share", base.fg(theme::CREAM))
        };

        let mut lines = vec![
            Line::from(Span::styled(
                self.card.name.clone(),
                base.fg(theme::YOLK).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.card.meta.clone(), base.fg(theme::CREAM))),
        ];
        if !self.card.image.alt.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("[{}]", self.card.image.alt),
                base.fg(theme::CRUST).add_modifier(Modifier::ITALIC),
            )));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("“{}”", self.card.quote),
            base.fg(theme::SYRUP).add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            share,
            Span::raw("    "),
            Span::styled("[r] Spin again", base.fg(theme::CREAM)),
        ]));

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(base.fg(theme::SYRUP))
            .title(Line::from(" Your breakfast ").centered());

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheel_core::{ImageRef, ItemId};

    fn card() -> ResultCard {
        ResultCard {
            id: ItemId(0),
            name: "Avocado Toast".into(),
            image: ImageRef {
                url: "toast.jpg".into(),
                alt: "Avocado on sourdough".into(),
            },
            meta: "Healthy • 380 kcal".into(),
            quote: "Fuel for champions!".into(),
        }
    }

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_panel_shows_fields() {
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        ResultPanel::new(&card()).render(area, &mut buf);

        let shown = text(&buf);
        assert!(shown.contains("Avocado Toast"));
        assert!(shown.contains("Healthy • 380 kcal"));
        assert!(shown.contains("Fuel for champions!"));
        assert!(shown.contains("[s] Share"));
    }

    #[test]
    fn test_panel_copied_feedback() {
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        ResultPanel::new(&card()).copied(true).render(area, &mut buf);

        let shown = text(&buf);
        assert!(shown.contains("✓ Copied!"));
        assert!(!shown.contains("[s] Share"));
    }
}
