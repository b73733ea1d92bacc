//! Two-contact scale/rotation interpretation with hysteresis.

use crate::config::GestureConfig;
use crate::error::ConfigError;
use crate::store::{GlyphCommand, GlyphId, GlyphPropertiesPatch, SelectedGlyph};
use crate::view::WorldPoint;

/// What a contact pair asks for before any filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTargets {
    pub font_size: f64,
    pub angle_degrees: f64,
}

/// Changes that passed the hysteresis thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphUpdate {
    pub font_size: Option<f64>,
    pub rotation: Option<f64>,
}

impl GlyphUpdate {
    pub fn is_empty(&self) -> bool {
        self.font_size.is_none() && self.rotation.is_none()
    }

    /// Store commands for `id`, font size first.
    pub fn into_commands(self, id: GlyphId) -> Vec<GlyphCommand> {
        let mut commands = Vec::with_capacity(2);
        if let Some(font_size) = self.font_size {
            commands.push(GlyphCommand::UpdateProperties {
                id,
                patch: GlyphPropertiesPatch::font_size(font_size),
            });
        }
        if let Some(degrees) = self.rotation {
            commands.push(GlyphCommand::UpdateRotation {
                id,
                degrees,
                extra: 0.0,
            });
        }
        commands
    }
}

/// Maps the distance and direction between two contacts onto the selected
/// glyph's font size and rotation.
///
/// Evaluated once per input event. Font size jumps straight to its target
/// once the change exceeds `font_threshold`; rotation moves a fixed fraction
/// (`rotation_gain`) of the way per event, so its speed follows the input
/// event rate.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    config: GestureConfig,
}

impl GestureInterpreter {
    /// Fails if `config` would make the targets meaningless (for example a
    /// non-positive `max_font_size`).
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Raw targets for an ordered contact pair.
    pub fn targets(&self, p1: WorldPoint, p2: WorldPoint) -> GestureTargets {
        let distance = p1.distance_to(p2);
        GestureTargets {
            font_size: (distance * self.config.scale_factor).clamp(0.0, self.config.max_font_size),
            angle_degrees: p1.angle_to_degrees(p2),
        }
    }

    /// Applies the dead-zones and rotation damping against the glyph's current state.
    pub fn step(&self, targets: GestureTargets, current: &SelectedGlyph) -> GlyphUpdate {
        let font_diff = (targets.font_size - current.font_size).abs();
        let angle_diff = (targets.angle_degrees - current.rotation_degrees).abs();

        let font_size = (font_diff > self.config.font_threshold).then_some(targets.font_size);
        let rotation = (angle_diff > self.config.angle_threshold)
            .then(|| self.damped_rotation(current.rotation_degrees, targets.angle_degrees));

        GlyphUpdate {
            font_size,
            rotation,
        }
    }

    /// Full evaluation for an ordered pair.
    pub fn evaluate(
        &self,
        p1: WorldPoint,
        p2: WorldPoint,
        current: &SelectedGlyph,
    ) -> GlyphUpdate {
        let targets = self.targets(p1, p2);
        let update = self.step(targets, current);
        tracing::debug!(
            "[gesture] targets font={:.2} angle={:.2} -> {:?}",
            targets.font_size,
            targets.angle_degrees,
            update
        );
        update
    }

    /// One low-pass step from `current` towards `target * rotation_target_multiplier`.
    pub fn damped_rotation(&self, current: f64, target_angle: f64) -> f64 {
        let goal = target_angle * self.config.rotation_target_multiplier;
        current + (goal - current) * self.config.rotation_gain
    }
}
