//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize, frame tick)
//! - [`WheelClient`] for everything the wheel decides
//! - [`DisplayState`] for rendering
//!
//! Each frame the app polls the wheel's clock, drains its messages into the
//! display state, expires cosmetic timers and redraws every layer.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Datelike;
use crossterm::event::{
    self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget, Wrap};
use ratatui::Terminal;
use tokio::time::Instant;
use unicode_width::UnicodeWidthStr;

use wheel_core::{
    Catalog, Mood, NotifyLevel, ShareExporter, TrackGeometry, WheelConfig, WheelMessage,
};

use crate::clipboard::{Osc52Clipboard, SystemClipboard};
use crate::compositor::{Compositor, LayerId};
use crate::display::{DisplayState, SwapStage, View};
use crate::theme;
use crate::wheel_client::WheelClient;
use crate::widgets::{put_clipped, CardTrack, ResultPanel, CARD_HEIGHT};

/// Rows above the track: title, mood bar, notice line
const HEADER_HEIGHT: u16 = 3;

/// Marker row above the cards
const STAGE_HEIGHT: u16 = CARD_HEIGHT + 1;

/// Result panel size
const RESULT_WIDTH: u16 = 60;
const RESULT_HEIGHT: u16 = 10;

/// Rows the result panel slides up while entering
const RESULT_SLIDE_ROWS: f32 = 3.0;

/// Alert box size
const ALERT_WIDTH: u16 = 48;
const ALERT_HEIGHT: u16 = 5;

/// Frame pacing (~30 FPS, matching the 30 ms scroll cadence)
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Layer IDs
struct Layers {
    header: LayerId,
    stage: LayerId,
    controls: LayerId,
    result: LayerId,
    footer: LayerId,
    alert: LayerId,
}

/// Main application state
pub struct App {
    /// Whether the app is running
    running: bool,
    /// Goodbye line printed after the terminal is restored
    goodbye_message: Option<String>,

    /// Embedded wheel session
    client: WheelClient,
    /// Display state derived from wheel messages
    display: DisplayState,
    /// Card width and gap, in cells
    layout: TrackGeometry,
    /// Footer year
    year: i32,

    compositor: Compositor,
    layers: Layers,
    size: (u16, u16),
}

impl App {
    /// Create the app for `catalog`, with the platform clipboard backends
    ///
    /// A `seed` makes the picks and pulse highlights repeat run to run.
    pub async fn new(
        catalog: Catalog,
        config: WheelConfig,
        mood: Option<Mood>,
        seed: Option<u64>,
    ) -> anyhow::Result<Self> {
        let exporter = ShareExporter::new(
            Arc::new(SystemClipboard::detect()),
            Arc::new(Osc52Clipboard),
        );
        let layout = config.layout;
        let mut client = WheelClient::new(catalog, config, exporter);
        if let Some(seed) = seed {
            tracing::info!(seed, "Using seeded random source");
            client = client.with_seed(seed);
        }
        client.connect().await?;
        if let Some(mood) = mood {
            client.change_mood(mood).await?;
        }

        let size = crossterm::terminal::size()?;
        Self::with_client(client, layout, size).await
    }

    /// Create the app around an existing client
    pub async fn with_client(
        client: WheelClient,
        layout: TrackGeometry,
        size: (u16, u16),
    ) -> anyhow::Result<Self> {
        let area = Rect::new(0, 0, size.0, size.1);
        let mut compositor = Compositor::new(area);
        let layers = Layers {
            header: compositor.create_layer(Rect::default(), 10),
            stage: compositor.create_layer(Rect::default(), 0),
            controls: compositor.create_layer(Rect::default(), 5),
            result: compositor.create_layer(Rect::default(), 0),
            footer: compositor.create_layer(Rect::default(), 10),
            alert: compositor.create_layer(Rect::default(), 100),
        };

        let mut app = Self {
            running: true,
            goodbye_message: None,
            client,
            display: DisplayState::new(),
            layout,
            year: chrono::Local::now().year(),
            compositor,
            layers,
            size,
        };
        app.handle_resize(size.0, size.1).await;
        app.process_wheel_messages();
        Ok(app)
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Terminal events first
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key).await;
                            }
                            Event::Mouse(mouse) => self.handle_mouse(mouse).await,
                            Event::Resize(w, h) => self.handle_resize(w, h).await,
                            _ => {}
                        },
                        Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                        None => self.running = false,
                    }
                }

                // Frame tick
                () = tokio::time::sleep(Duration::from_millis(16)) => {}
            }

            // Run the wheel's clock
            self.client.poll(Instant::now()).await;

            self.process_wheel_messages();
            self.display.update(Instant::now());
            self.render(terminal)?;

            if self.display.quit {
                self.running = false;
            }

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_DURATION {
                tokio::time::sleep(FRAME_DURATION - elapsed).await;
            }
        }

        Ok(())
    }

    /// Goodbye line from the wheel, if it sent one
    pub fn goodbye(&self) -> Option<&str> {
        self.goodbye_message.as_deref()
    }

    /// The display state (for inspection)
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Apply every pending wheel message to the display
    fn process_wheel_messages(&mut self) {
        let now = Instant::now();
        for msg in self.client.recv_all() {
            if let WheelMessage::Quit { message } = &msg {
                self.goodbye_message.clone_from(message);
            }
            self.display.apply_message_at(msg, now);
        }
    }

    async fn quit(&mut self) {
        if let Err(e) = self.client.request_quit().await {
            tracing::debug!(error = %e, "Quit request failed");
        }
        self.process_wheel_messages();
        self.running = false;
    }

    /// Handle keyboard input
    async fn handle_key(&mut self, key: event::KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit().await;
            return;
        }

        // An alert swallows the next key
        if self.display.alert.is_some() {
            self.display.dismiss_alert();
            return;
        }

        let result = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.quit().await;
                Ok(())
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.client.spin().await,
            KeyCode::Left => self.client.prev_mood().await,
            KeyCode::Right | KeyCode::Tab => self.client.next_mood().await,
            KeyCode::Char('r') => self.client.reset().await,
            KeyCode::Char('s') => self.client.share().await,
            _ => Ok(()),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Key handling failed");
        }
    }

    /// Handle mouse input
    async fn handle_mouse(&mut self, mouse: event::MouseEvent) {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return;
        };

        if self.display.alert.is_some() {
            self.display.dismiss_alert();
            return;
        }

        let result = match self.compositor.layer_at(mouse.column, mouse.row) {
            Some(id) if id == self.layers.controls => self.client.spin().await,
            Some(id) if id == self.layers.header => self.client.next_mood().await,
            _ => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Mouse handling failed");
        }
    }

    /// Handle terminal resize
    async fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.compositor.resize(Rect::new(0, 0, width, height));

        let body_y = HEADER_HEIGHT + 1;
        let body_height = height.saturating_sub(body_y + 1);

        self.compositor
            .place_layer(self.layers.header, Rect::new(0, 0, width, HEADER_HEIGHT));
        self.compositor.place_layer(
            self.layers.stage,
            Rect::new(0, body_y, width, STAGE_HEIGHT.min(body_height)),
        );
        self.compositor.place_layer(
            self.layers.result,
            Rect::new(0, body_y, width, body_height),
        );
        self.compositor.place_layer(
            self.layers.footer,
            Rect::new(0, height.saturating_sub(1), width, 1),
        );

        let alert_w = ALERT_WIDTH.min(width);
        let alert_h = ALERT_HEIGHT.min(height);
        self.compositor.place_layer(
            self.layers.alert,
            Rect::new(
                (width - alert_w) / 2,
                (height - alert_h) / 2,
                alert_w,
                alert_h,
            ),
        );
        self.place_controls();

        let geometry = TrackGeometry::new(
            self.layout.card_width,
            self.layout.gap,
            f32::from(width),
        );
        if let Err(e) = self.client.resized(geometry).await {
            tracing::debug!(error = %e, "Resize not delivered");
        }
    }

    /// The spin control is sized to its label, centered under the track
    fn place_controls(&mut self) {
        let (width, height) = self.size;
        let label_width = u16::try_from(self.spin_button_text().width()).unwrap_or(u16::MAX);
        let w = label_width.min(width);
        let y = HEADER_HEIGHT + 1 + STAGE_HEIGHT + 1;
        let bounds = if y < height.saturating_sub(1) {
            Rect::new((width - w) / 2, y, w, 1)
        } else {
            Rect::default()
        };
        self.compositor.place_layer(self.layers.controls, bounds);
    }

    fn spin_button_text(&self) -> String {
        format!("  {}  ", self.display.spin_label)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the UI
    fn render(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
        let now = Instant::now();
        let showing = self.display.showing(now);
        let stage = self.display.swap.map(|swap| swap.stage(now));

        self.place_controls();
        self.compositor
            .set_visible(self.layers.stage, showing == View::Selection);
        self.compositor
            .set_visible(self.layers.controls, showing == View::Selection);
        self.compositor
            .set_visible(self.layers.result, showing == View::Result);
        self.compositor
            .set_visible(self.layers.alert, self.display.alert.is_some());

        let fading = matches!(stage, Some(SwapStage::Exiting(_)));
        let slide = match stage {
            Some(SwapStage::Entering(p)) => (1.0 - p).max(0.0) * RESULT_SLIDE_ROWS,
            _ => 0.0,
        };

        self.render_header();
        self.render_stage(fading);
        self.render_controls(fading);
        self.render_result(fading, slide);
        self.render_footer();
        self.render_alert();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    buf[(x, y)] = output[(x, y)].clone();
                }
            }
        })?;

        Ok(())
    }

    /// Title, mood bar and notice line
    fn render_header(&mut self) {
        let current = self.display.mood.clone();
        let notice = self.notice_line();

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.header) else {
            return;
        };
        buf.reset();
        let area = buf.area;

        let title = "🍳 Breakfast Wheel";
        let title_x = i32::from(area.width) / 2 - i32::try_from(title.width() / 2).unwrap_or(0);
        put_clipped(
            buf,
            area,
            title_x,
            0,
            title,
            Style::default().fg(theme::YOLK).add_modifier(Modifier::BOLD),
        );

        let mut x = 2_i32;
        put_clipped(buf, area, x, 1, "Mood:", Style::default().fg(theme::CREAM));
        x += 7;
        for choice in Mood::CHOICES {
            let mood = Mood::new(choice);
            let label = mood.label();
            let (text, style) = if mood == current {
                (
                    format!("◀ {label} ▶"),
                    Style::default().fg(theme::BERRY).add_modifier(Modifier::BOLD),
                )
            } else {
                (label, Style::default().fg(theme::DIM_GRAY))
            };
            put_clipped(buf, area, x, 1, &text, style);
            x += i32::try_from(text.width()).unwrap_or(0) + 2;
        }

        if let Some((text, style)) = notice {
            put_clipped(buf, area, 2, 2, &text, style);
        }
    }

    fn notice_line(&self) -> Option<(String, Style)> {
        if let Some(n) = &self.display.notification {
            let color = match n.level {
                NotifyLevel::Error => theme::ERROR_RED,
                NotifyLevel::Warning => theme::SYRUP,
                NotifyLevel::Success => theme::SUCCESS_GREEN,
                NotifyLevel::Info => theme::CREAM,
            };
            return Some((n.message.clone(), Style::default().fg(color)));
        }
        if self.display.fallback {
            return Some((
                format!(
                    "Nothing on the menu for {}, so everything is in play",
                    self.display.mood.label()
                ),
                Style::default()
                    .fg(theme::DIM_GRAY)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        None
    }

    /// Marker and card track
    fn render_stage(&mut self, fading: bool) {
        let cards: Vec<_> = self.display.visible_cards().cloned().collect();
        let offset = self.display.offset;
        let card_width = cells(self.layout.card_width);
        let gap = cells(self.layout.gap);

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.stage) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        if area.height < STAGE_HEIGHT {
            return;
        }

        put_clipped(
            buf,
            area,
            i32::from(area.width / 2),
            0,
            "▼",
            Style::default().fg(theme::SYRUP),
        );

        let track_area = Rect::new(0, 1, area.width, CARD_HEIGHT);
        CardTrack::new(cards.iter())
            .geometry(card_width, gap)
            .offset(offset)
            .render(track_area, buf);

        if fading {
            buf.set_style(area, Style::default().add_modifier(Modifier::DIM));
        }
    }

    /// Spin control
    fn render_controls(&mut self, fading: bool) {
        let text = self.spin_button_text();
        let style = if self.display.spin_enabled && !fading {
            Style::default()
                .fg(theme::CREAM)
                .bg(theme::BUTTON_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(theme::DIM_GRAY)
                .bg(theme::BUTTON_BG)
                .add_modifier(Modifier::DIM)
        };

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.controls) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        put_clipped(buf, area, 0, 0, &text, style);
    }

    /// Winning card panel
    fn render_result(&mut self, fading: bool, slide: f32) {
        let copied = self.display.copied();
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.result) else {
            return;
        };
        buf.reset();
        let Some(card) = self.display.result.as_ref() else {
            return;
        };
        let area = buf.area;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let slide = slide.round() as u16;
        let w = RESULT_WIDTH.min(area.width);
        let y = slide.min(area.height);
        let h = RESULT_HEIGHT.min(area.height - y);
        let panel = Rect::new((area.width - w) / 2, y, w, h);

        ResultPanel::new(card)
            .copied(copied)
            .faded(fading)
            .render(panel, buf);
    }

    /// Copyright and key hints
    fn render_footer(&mut self) {
        let year = self.year;
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.footer) else {
            return;
        };
        buf.reset();
        let area = buf.area;

        let hint_style = Style::default().fg(theme::DIM_GRAY);
        put_clipped(buf, area, 1, 0, &format!("© {year} Breakfast Wheel"), hint_style);

        let hints = "←/→ mood · space spin · r again · s share · q quit";
        let x = i32::from(area.width) - i32::try_from(hints.width()).unwrap_or(0) - 1;
        put_clipped(buf, area, x, 0, hints, hint_style);
    }

    /// Blocking alert
    fn render_alert(&mut self) {
        let Some(message) = self.display.alert.clone() else {
            return;
        };
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.alert) else {
            return;
        };
        buf.reset();
        let area = buf.area;

        let style = Style::default().fg(theme::ERROR_RED).bg(theme::ALERT_BG);
        Paragraph::new(format!("{message}\n(press any key)"))
            .style(style)
            .centered()
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Double)
                    .border_style(style),
            )
            .render(area, buf);
    }
}

/// Whole cells for a layout length
fn cells(length: f32) -> u16 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cells = length.round().clamp(0.0, f32::from(u16::MAX)) as u16;
    cells
}
