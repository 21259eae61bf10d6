//! Theme and Colors
//!
//! Warm breakfast palette: toast browns, yolk yellow, syrup amber.
//! Card emphasis (hot, cool, winner, dimmed) is turned into terminal
//! styles here so the widgets never look at raw numbers.

use ratatui::style::{Color, Modifier, Style};
use wheel_core::CardEmphasis;

// ============================================================================
// Breakfast Palette
// ============================================================================

/// Title text - egg yolk
pub const YOLK: Color = Color::Rgb(255, 200, 60);

/// Card border at rest - toast crust
pub const CRUST: Color = Color::Rgb(181, 128, 80);

/// Card text
pub const CREAM: Color = Color::Rgb(250, 240, 220);

/// Glow around hot and winning cards - maple syrup
pub const SYRUP: Color = Color::Rgb(255, 160, 40);

/// Cards passed over by a pulse
pub const COLD_COFFEE: Color = Color::Rgb(130, 110, 95);

/// Dimmed losers and hints
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Selected mood in the mood bar
pub const BERRY: Color = Color::Rgb(220, 90, 130);

/// Healthy/success green
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

/// Alert background
pub const ALERT_BG: Color = Color::Rgb(90, 30, 30);

/// Alert text
pub const ERROR_RED: Color = Color::Rgb(255, 110, 110);

/// Spin control background
pub const BUTTON_BG: Color = Color::Rgb(120, 70, 30);

// ============================================================================
// Card Looks
// ============================================================================

/// Terminal rendering of a card's emphasis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardLook {
    /// Style for the border
    pub border: Style,
    /// Style for the text inside
    pub text: Style,
    /// Draw the border with heavy line characters
    pub heavy: bool,
}

/// How a card with `emphasis` is drawn
pub fn card_look(emphasis: CardEmphasis) -> CardLook {
    let style = emphasis.style();

    if style.opacity < 0.5 {
        let faded = Style::default().fg(DIM_GRAY).add_modifier(Modifier::DIM);
        return CardLook {
            border: faded,
            text: faded,
            heavy: false,
        };
    }

    let glowing = style.glow > 0.0;
    let heavy = style.glow >= 0.75;
    let border_color = if glowing {
        SYRUP
    } else if style.scale < 1.0 {
        COLD_COFFEE
    } else {
        CRUST
    };

    let mut text = Style::default().fg(if style.scale < 1.0 { COLD_COFFEE } else { CREAM });
    if heavy {
        text = text.add_modifier(Modifier::BOLD);
    }

    CardLook {
        border: Style::default().fg(border_color),
        text,
        heavy,
    }
}
