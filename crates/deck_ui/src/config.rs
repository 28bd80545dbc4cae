//! Page configuration.
//!
//! Loaded once at startup. Every field has a default matching the shipped
//! presentation, so an empty file is a valid configuration:
//!
//! ```toml
//! [metrics]
//! duration_ms = 2000.0
//! easing = "quartic-out"
//!
//! [navigation]
//! nav_offset = 80.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use deck_core::{DeckError, DeckResult, Easing};

/// Metric counter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricConfig {
    /// Count-up duration (milliseconds).
    pub duration_ms: f64,
    /// Count-up curve.
    pub easing: Easing,
    /// Delay between successive metric cards getting their count-up class (milliseconds).
    pub stagger_ms: f64,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            easing: Easing::QuarticOut,
            stagger_ms: 200.0,
        }
    }
}

/// Section navigation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Height of the fixed navbar subtracted from scroll targets (pixels).
    pub nav_offset: f32,
    /// Distance below the viewport top that decides the current section (pixels).
    pub focus_line: f32,
    /// Minimum vertical travel for a swipe (pixels).
    pub swipe_threshold: f32,
    /// Quiet period before the trailing highlight pass (milliseconds).
    pub debounce_ms: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            nav_offset: 80.0,
            focus_line: 100.0,
            swipe_threshold: 50.0,
            debounce_ms: 10.0,
        }
    }
}

/// Scroll reveal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible fraction that reveals a card.
    pub card_threshold: f32,
    /// Pixels trimmed off the viewport bottom for cards.
    pub card_bottom_margin: f32,
    /// Visible fraction that fills a feature bar.
    pub bar_threshold: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            card_threshold: 0.1,
            card_bottom_margin: 50.0,
            bar_threshold: 0.5,
        }
    }
}

/// Hover style values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    /// `box-shadow` for glowing elements.
    pub glow: String,
    /// `background-color` for highlighted rows.
    pub highlight: String,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            glow: "0 0 20px rgba(37, 99, 235, 0.3)".to_string(),
            highlight: "rgba(37, 99, 235, 0.05)".to_string(),
        }
    }
}

/// Complete page configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Metric counters.
    pub metrics: MetricConfig,
    /// Section navigation.
    pub navigation: NavigationConfig,
    /// Scroll reveal.
    pub reveal: RevealConfig,
    /// Hover styling.
    pub hover: HoverConfig,
}

impl PageConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema or a
    /// value is out of range.
    pub fn from_toml_str(text: &str) -> DeckResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> DeckResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DeckError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "page config loaded");
        Ok(config)
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> DeckResult<()> {
        let metrics = &self.metrics;
        if !(metrics.duration_ms.is_finite() && metrics.duration_ms > 0.0) {
            return Err(invalid("metrics.duration_ms", "must be a positive number"));
        }
        if !(metrics.stagger_ms.is_finite() && metrics.stagger_ms >= 0.0) {
            return Err(invalid("metrics.stagger_ms", "must not be negative"));
        }

        let nav = &self.navigation;
        if !(nav.debounce_ms.is_finite() && nav.debounce_ms >= 0.0) {
            return Err(invalid("navigation.debounce_ms", "must not be negative"));
        }
        if !(nav.swipe_threshold.is_finite() && nav.swipe_threshold >= 0.0) {
            return Err(invalid("navigation.swipe_threshold", "must not be negative"));
        }
        if !(nav.nav_offset.is_finite() && nav.focus_line.is_finite()) {
            return Err(invalid("navigation", "offsets must be finite"));
        }

        let reveal = &self.reveal;
        for (name, threshold) in [
            ("reveal.card_threshold", reveal.card_threshold),
            ("reveal.bar_threshold", reveal.bar_threshold),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(invalid(name, "must be between 0 and 1"));
            }
        }
        if !reveal.card_bottom_margin.is_finite() {
            return Err(invalid("reveal.card_bottom_margin", "must be finite"));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> DeckError {
    DeckError::InvalidConfig(format!("{field} {reason}"))
}
