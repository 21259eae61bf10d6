//! Wheel Core - Headless Breakfast Wheel
//!
//! This crate holds everything the Breakfast Wheel does that is not
//! drawing: the card catalog, the mood filter, the random selector, the
//! timed spin choreography, the result presenter and share/export. It can
//! drive a terminal UI, a web page, or run headless in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                              │
//! │        ┌──────────────┐        ┌──────────────────────┐         │
//! │        │     TUI      │        │   Headless / Tests   │         │
//! │        │  (ratatui)   │        │                      │         │
//! │        └──────┬───────┘        └──────────┬───────────┘         │
//! │               └──────────────┬────────────┘                     │
//! │                      WheelEvent (up)                            │
//! │                     WheelMessage (down)                         │
//! └──────────────────────────────┼──────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┼──────────────────────────────────┐
//! │                         WHEEL CORE                              │
//! │  ┌───────────────────────────┴───────────────────────────────┐  │
//! │  │                         Wheel                             │  │
//! │  │  ┌─────────┐  ┌────────┐  ┌──────────┐  ┌─────────────┐   │  │
//! │  │  │ Catalog │─►│ Filter │─►│ Selector │─►│  Sequencer  │   │  │
//! │  │  └─────────┘  └────────┘  └──────────┘  └──────┬──────┘   │  │
//! │  │                          ┌───────────┐  ┌──────▼──────┐   │  │
//! │  │                          │   Share   │◄─│  Presenter  │   │  │
//! │  │                          └───────────┘  └─────────────┘   │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Wheel`]: One session; owns catalog, mood, selection and sequencer
//! - [`WheelMessage`]: Directives sent from the wheel to UI surfaces
//! - [`WheelEvent`]: Events sent from UI surfaces to the wheel
//! - [`Sequencer`]: Deadline-driven spin phase machine
//! - [`Catalog`]: The ordered, read-only card list
//!
//! # Quick Start
//!
//! ```ignore
//! use wheel_core::{Catalog, ShareExporter, Wheel, WheelConfig, WheelEvent};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (tx, mut rx) = mpsc::channel(256);
//!     let mut wheel = Wheel::new(
//!         Catalog::builtin()?,
//!         WheelConfig::default(),
//!         ShareExporter::disabled(),
//!         tx,
//!     );
//!
//!     wheel.handle_event(WheelEvent::Connected).await?;
//!     wheel.handle_event(WheelEvent::SpinRequested).await?;
//!
//!     // Poll the clock until the spin is over
//!     while let Some(deadline) = wheel.next_deadline() {
//!         tokio::time::sleep_until(deadline).await;
//!         wheel.poll(tokio::time::Instant::now()).await;
//!         while let Ok(msg) = rx.try_recv() {
//!             // Render message
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`animation`]: Track geometry, scroll paths, easing and card emphasis
//! - [`catalog`]: Card markup parsing and the item list
//! - [`config`]: TOML/env/CLI configuration
//! - [`driver`]: Runs a wheel on its own task
//! - [`events`]: Events from UI surfaces to the wheel
//! - [`filter`]: Mood filter with empty-result fallback
//! - [`messages`]: Messages from the wheel to UI surfaces
//! - [`mood`]: Mood tags
//! - [`presenter`]: Result fields, flavor lines and view swaps
//! - [`selector`]: Uniform random choice
//! - [`sequencer`]: Spin phase machine
//! - [`share`]: Text export and clipboard backends
//! - [`wheel`]: The session object
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod animation;
pub mod catalog;
pub mod config;
pub mod driver;
pub mod events;
pub mod filter;
pub mod messages;
pub mod mood;
pub mod presenter;
pub mod selector;
pub mod sequencer;
pub mod share;
pub mod wheel;

// Re-exports for convenience
pub use animation::{CardEmphasis, CardStyle, EasingFunction, ScrollPath, TrackGeometry};
pub use catalog::{BreakfastItem, CardMarkup, Catalog, CatalogError, ImageRef, ItemId};
pub use driver::{spawn_wheel, WheelHandle};
pub use events::WheelEvent;
pub use filter::{candidates, filter, Candidates};
pub use messages::{NotifyLevel, WheelMessage, SPINNING_LABEL, SPIN_LABEL};
pub use mood::{Mood, MoodSet, WILDCARD};
pub use presenter::{ResultCard, ResultPresenter, ViewTransition};
pub use selector::pick;
pub use sequencer::{Cue, Phase, Sequencer};
pub use share::{
    export_text, ClipboardBackend, ClipboardError, ExportOutcome, MemoryClipboard, NoClipboard,
    ShareError, ShareExporter, COPY_FAILED_MESSAGE,
};
pub use wheel::{MessageSink, Wheel};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, ShareConfig, TimingConfig, WheelConfig, WheelToml,
};
