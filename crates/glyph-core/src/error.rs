//! Error types for gesture interpretation and configuration.

use thiserror::Error;

use crate::store::GlyphId;

/// Conditions raised while interpreting input.
///
/// All of these come from ordinary input races or a misconfigured view and
/// are recovered by the engine; none reach the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    /// The view transform cannot map points (zoom is not a positive finite number).
    #[error("invalid view transform: zoom must be positive and finite, got {zoom}")]
    InvalidTransform { zoom: f64 },

    /// The referenced glyph no longer exists in the store.
    #[error("glyph {0} no longer exists")]
    StaleSelection(GlyphId),

    /// More simultaneous contacts than the gesture engine interprets.
    #[error("unexpected contact count: {0}")]
    UnexpectedContactCount(usize),
}

/// Errors produced while loading or validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
