//! Glyph Gesture Core
//!
//! Turns raw multi-touch input into glyph manipulation:
//! - two contacts scale and rotate the selected glyph
//! - a sustained single contact creates a new glyph at the held point
//!
//! Input flows through the [`TouchTracker`] (view space), is mapped to world
//! space by [`ViewTransform`], then either ordered and interpreted by the
//! [`GestureInterpreter`] or handed to the [`HoldDetector`]. The
//! [`GestureEngine`] ties the pieces together and dispatches
//! [`GlyphCommand`]s to a [`GlyphStore`].

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod engine;
pub mod error;
pub mod hold;
pub mod interpreter;
pub mod order;
pub mod store;
pub mod tracker;
pub mod view;

pub use config::{EngineConfig, FontAxis, FontSettings, GestureConfig};
pub use engine::{GestureEngine, GestureMode};
pub use error::{ConfigError, GestureError};
pub use hold::{HoldDetector, HoldState};
pub use interpreter::{GestureInterpreter, GestureTargets, GlyphUpdate};
pub use order::{Segment, connector_segments, order_by_angle};
pub use store::{
    Glyph, GlyphCommand, GlyphId, GlyphProperties, GlyphPropertiesPatch, GlyphStore,
    MemoryGlyphStore, SelectedGlyph,
};
pub use tracker::{ContactId, SharedTracker, TouchTracker};
pub use view::{CONTACT_RADIUS_PX, ViewPoint, ViewTransform, WorldPoint};
