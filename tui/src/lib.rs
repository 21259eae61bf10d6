//! Breakfast Wheel TUI - terminal surface for the Breakfast Wheel
//!
//! A full-screen terminal front end: a mood bar, a scrolling strip of
//! breakfast cards, a spin control and the result panel with share and
//! spin-again actions. All decisions are made by the embedded
//! [`wheel_core::Wheel`]; this crate only draws what it is told.
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering with z-ordering (alert on top)
//! - **Display**: State derived from wheel messages plus cosmetic timers
//! - **Widgets**: Card track and result panel
//! - **Clipboard**: System copy tools with an OSC 52 fallback

pub mod app;
pub mod clipboard;
pub mod compositor;
pub mod display;
pub mod theme;
pub mod wheel_client;
pub mod widgets;

pub use app::App;
pub use display::DisplayState;
pub use wheel_client::WheelClient;
