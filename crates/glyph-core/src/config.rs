//! Engine configuration: gesture tuning and font settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tuning constants for the two-contact gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Font size per world unit of contact distance.
    pub scale_factor: f64,
    /// Upper bound for the proposed font size.
    pub max_font_size: f64,
    /// Font size changes at or below this are ignored.
    pub font_threshold: f64,
    /// Rotation changes (degrees) at or below this are ignored.
    pub angle_threshold: f64,
    /// Fraction of the remaining distance covered per input event.
    pub rotation_gain: f64,
    /// The damped rotation chases `target_angle * rotation_target_multiplier`.
    pub rotation_target_multiplier: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            scale_factor: 3.0,
            max_font_size: 3000.0,
            font_threshold: 5.0,
            angle_threshold: 2.0,
            rotation_gain: 0.15,
            rotation_target_multiplier: 2.0,
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            ("scale_factor", self.scale_factor),
            ("max_font_size", self.max_font_size),
            ("font_threshold", self.font_threshold),
            ("angle_threshold", self.angle_threshold),
            ("rotation_gain", self.rotation_gain),
            ("rotation_target_multiplier", self.rotation_target_multiplier),
        ];
        if let Some((name, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite")));
        }
        if self.scale_factor <= 0.0 {
            return Err(ConfigError::Invalid("scale_factor must be positive".into()));
        }
        if self.max_font_size <= 0.0 {
            return Err(ConfigError::Invalid("max_font_size must be positive".into()));
        }
        if self.font_threshold < 0.0 || self.angle_threshold < 0.0 {
            return Err(ConfigError::Invalid("thresholds must not be negative".into()));
        }
        if self.rotation_gain <= 0.0 || self.rotation_gain > 1.0 {
            return Err(ConfigError::Invalid("rotation_gain must be in (0, 1]".into()));
        }
        Ok(())
    }
}

/// A font-variation axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontAxis {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

/// Font settings used when creating glyphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub default_font_size: f64,
    /// Variation axes keyed by axis name. May be empty.
    pub axes: BTreeMap<String, FontAxis>,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            default_font_size: 70.0,
            axes: BTreeMap::new(),
        }
    }
}

impl FontSettings {
    /// Every configured axis mapped to its declared default.
    pub fn axis_defaults(&self) -> BTreeMap<String, f64> {
        self.axes
            .iter()
            .map(|(name, axis)| (name.clone(), axis.default))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_font_size.is_finite() || self.default_font_size <= 0.0 {
            return Err(ConfigError::Invalid(
                "default_font_size must be positive".into(),
            ));
        }
        for (name, axis) in &self.axes {
            if !(axis.min.is_finite() && axis.max.is_finite() && axis.default.is_finite()) {
                return Err(ConfigError::Invalid(format!("axis {name} has non-finite bounds")));
            }
            if !(axis.min <= axis.default && axis.default <= axis.max) {
                return Err(ConfigError::Invalid(format!(
                    "axis {name} default {} is outside [{}, {}]",
                    axis.default, axis.min, axis.max
                )));
            }
        }
        Ok(())
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gesture: GestureConfig,
    pub font: FontSettings,
}

impl EngineConfig {
    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gesture.validate()?;
        self.font.validate()
    }
}
