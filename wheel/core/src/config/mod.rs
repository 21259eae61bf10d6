//! TOML Configuration File Support
//!
//! Centralized configuration loading for the wheel, read from
//! `~/.config/breakfast-wheel/wheel.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (applied by the caller through [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # XDG Base Directory Compliance
//!
//! - `$XDG_CONFIG_HOME/breakfast-wheel/wheel.toml` (typically
//!   `~/.config/breakfast-wheel/wheel.toml`)
//!
//! # Example Configuration
//!
//! ```toml
//! [timing]
//! pulse_interval_ms = 120
//! pulse_ticks = 25
//! pulse_hot_probability = 0.4
//! scroll_interval_ms = 30
//! spin_duration_ms = 3500
//! reveal_pause_ms = 1200
//! reset_delay_ms = 500
//! reset_transition_ms = 500
//! overshoot_passes = 3
//! scroll_easing = "ease_out_cubic"
//!
//! [layout]
//! card_width = 24
//! card_gap = 2
//! track_width = 80
//!
//! [catalog]
//! path = "~/breakfasts.toml"
//!
//! [share]
//! call_to_action = "Try the Breakfast Wheel!"
//! copied_feedback_ms = 2000
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::{EasingFunction, TrackGeometry};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Timing section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingToml {
    /// Interval between pulse highlights in milliseconds
    pub pulse_interval_ms: Option<u64>,

    /// Maximum number of pulse highlights per spin
    pub pulse_ticks: Option<u32>,

    /// Chance that a card lights up on a pulse tick
    pub pulse_hot_probability: Option<f64>,

    /// Interval between scroll updates in milliseconds
    pub scroll_interval_ms: Option<u64>,

    /// Length of the motion stage in milliseconds
    pub spin_duration_ms: Option<u64>,

    /// Pause between settling and showing the result
    pub reveal_pause_ms: Option<u64>,

    /// Pause between showing the result and clearing the stage
    pub reset_delay_ms: Option<u64>,

    /// Time the stage takes to return to rest
    pub reset_transition_ms: Option<u64>,

    /// Full laps the track makes before landing
    pub overshoot_passes: Option<u32>,

    /// Scroll deceleration curve
    pub scroll_easing: Option<EasingFunction>,
}

/// Layout section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutToml {
    /// Card width in surface units
    pub card_width: Option<f32>,

    /// Gap between cards
    pub card_gap: Option<f32>,

    /// Viewport width
    pub track_width: Option<f32>,
}

/// Catalog section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogToml {
    /// Card file to load instead of the built-in cards
    pub path: Option<PathBuf>,
}

/// Share section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareToml {
    /// Closing line of the exported text
    pub call_to_action: Option<String>,

    /// How long the "copied" confirmation stays visible
    pub copied_feedback_ms: Option<u64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelToml {
    /// Timing configuration section
    pub timing: TimingToml,

    /// Layout configuration section
    pub layout: LayoutToml,

    /// Catalog configuration section
    pub catalog: CatalogToml,

    /// Share configuration section
    pub share: ShareToml,
}

// =============================================================================
// Main Configuration Structs
// =============================================================================

/// Durations and knobs of the spin choreography
#[derive(Clone, Debug, PartialEq)]
pub struct TimingConfig {
    /// Interval between pulse ticks
    pub pulse_interval: Duration,
    /// Maximum number of pulse ticks
    pub pulse_ticks: u32,
    /// Per-card chance of being "hot" on a pulse tick
    pub pulse_hot_probability: f64,
    /// Interval between scroll ticks
    pub scroll_interval: Duration,
    /// Shared duration of the pulse and scroll stage
    pub spin_duration: Duration,
    /// Settle to reveal
    pub reveal_pause: Duration,
    /// Reveal to stage clear
    pub reset_delay: Duration,
    /// Stage clear to idle
    pub reset_transition: Duration,
    /// Full laps before the landing lap
    pub overshoot_passes: u32,
    /// Scroll deceleration curve
    pub scroll_easing: EasingFunction,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pulse_interval: Duration::from_millis(120),
            pulse_ticks: 25,
            pulse_hot_probability: 0.4,
            scroll_interval: Duration::from_millis(30),
            spin_duration: Duration::from_millis(3500),
            reveal_pause: Duration::from_millis(1200),
            reset_delay: Duration::from_millis(500),
            reset_transition: Duration::from_millis(500),
            overshoot_passes: 3,
            scroll_easing: EasingFunction::EaseOutCubic,
        }
    }
}

impl TimingConfig {
    /// Total time from spin acceptance until the wheel is idle again
    #[must_use]
    pub fn sequence_length(&self) -> Duration {
        self.spin_duration + self.reveal_pause + self.reset_delay + self.reset_transition
    }
}

/// Share/export settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareConfig {
    /// Closing line of the exported text
    pub call_to_action: String,
    /// How long surfaces show the "copied" confirmation
    pub copied_feedback: Duration,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            call_to_action: "Try the Breakfast Wheel!".to_string(),
            copied_feedback: Duration::from_millis(2000),
        }
    }
}

/// Centralized configuration for the wheel
///
/// Consolidates all configuration from multiple sources and tracks where
/// values came from. Use [`load_config`] to load with proper priority.
#[derive(Clone, Debug)]
pub struct WheelConfig {
    /// Spin choreography timing
    pub timing: TimingConfig,

    /// Initial track geometry (surfaces update it on resize)
    pub layout: TrackGeometry,

    /// Card file to load, `None` for the built-in cards
    pub catalog_path: Option<PathBuf>,

    /// Share/export settings
    pub share: ShareConfig,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            layout: TrackGeometry::default(),
            catalog_path: None,
            share: ShareConfig::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl WheelConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Check that every value is usable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;
        if t.pulse_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "timing.pulse_interval_ms must be greater than 0".into(),
            ));
        }
        if t.scroll_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "timing.scroll_interval_ms must be greater than 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&t.pulse_hot_probability) {
            return Err(ConfigError::ValidationError(format!(
                "timing.pulse_hot_probability must be within 0..=1, got {}",
                t.pulse_hot_probability
            )));
        }
        if self.layout.card_width <= 0.0 {
            return Err(ConfigError::ValidationError(
                "layout.card_width must be greater than 0".into(),
            ));
        }
        if self.layout.gap < 0.0 || self.layout.track_width < 0.0 {
            return Err(ConfigError::ValidationError(
                "layout.card_gap and layout.track_width must not be negative".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/breakfast-wheel/wheel.toml` or
/// `~/.config/breakfast-wheel/wheel.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("breakfast-wheel").join("wheel.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// the merged values fail validation. A missing config file is not an error.
pub fn load_config() -> Result<WheelConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if the merged values fail validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<WheelConfig, ConfigError> {
    let mut config = WheelConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: WheelToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config);
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut WheelConfig, toml: &WheelToml) {
    let timing = &mut config.timing;
    if let Some(ms) = toml.timing.pulse_interval_ms {
        timing.pulse_interval = Duration::from_millis(ms);
    }
    if let Some(ticks) = toml.timing.pulse_ticks {
        timing.pulse_ticks = ticks;
    }
    if let Some(p) = toml.timing.pulse_hot_probability {
        timing.pulse_hot_probability = p;
    }
    if let Some(ms) = toml.timing.scroll_interval_ms {
        timing.scroll_interval = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.timing.spin_duration_ms {
        timing.spin_duration = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.timing.reveal_pause_ms {
        timing.reveal_pause = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.timing.reset_delay_ms {
        timing.reset_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.timing.reset_transition_ms {
        timing.reset_transition = Duration::from_millis(ms);
    }
    if let Some(passes) = toml.timing.overshoot_passes {
        timing.overshoot_passes = passes;
    }
    if let Some(easing) = toml.timing.scroll_easing {
        timing.scroll_easing = easing;
    }

    if let Some(width) = toml.layout.card_width {
        config.layout.card_width = width;
    }
    if let Some(gap) = toml.layout.card_gap {
        config.layout.gap = gap;
    }
    if let Some(width) = toml.layout.track_width {
        config.layout.track_width = width;
    }

    if toml.catalog.path.is_some() {
        config.catalog_path = toml.catalog.path.clone();
    }

    if let Some(ref cta) = toml.share.call_to_action {
        config.share.call_to_action = cta.clone();
    }
    if let Some(ms) = toml.share.copied_feedback_ms {
        config.share.copied_feedback = Duration::from_millis(ms);
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut WheelConfig) {
    if let Ok(value) = std::env::var("WHEEL_SPIN_DURATION_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            config.timing.spin_duration = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(value) = std::env::var("WHEEL_PULSE_INTERVAL_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            config.timing.pulse_interval = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(value) = std::env::var("WHEEL_OVERSHOOT_PASSES") {
        if let Ok(n) = value.parse::<u32>() {
            config.timing.overshoot_passes = n;
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(path) = std::env::var("WHEEL_CATALOG") {
        if !path.is_empty() {
            config.catalog_path = Some(PathBuf::from(path));
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(cta) = std::env::var("WHEEL_SHARE_CTA") {
        config.share.call_to_action = cta;
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Catalog path override
    pub catalog_path: Option<PathBuf>,

    /// Spin duration override (milliseconds)
    pub spin_duration_ms: Option<u64>,

    /// Share call-to-action override
    pub call_to_action: Option<String>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set catalog path override
    #[must_use]
    pub fn with_catalog_path(mut self, path: PathBuf) -> Self {
        self.catalog_path = Some(path);
        self
    }

    /// Set spin duration override
    #[must_use]
    pub fn with_spin_duration_ms(mut self, ms: u64) -> Self {
        self.spin_duration_ms = Some(ms);
        self
    }

    /// Set call-to-action override
    #[must_use]
    pub fn with_call_to_action(mut self, cta: impl Into<String>) -> Self {
        self.call_to_action = Some(cta.into());
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut WheelConfig) {
        if self.catalog_path.is_some()
            || self.spin_duration_ms.is_some()
            || self.call_to_action.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref path) = self.catalog_path {
            config.catalog_path = Some(path.clone());
        }
        if let Some(ms) = self.spin_duration_ms {
            config.timing.spin_duration = Duration::from_millis(ms);
        }
        if let Some(ref cta) = self.call_to_action {
            config.share.call_to_action = cta.clone();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
