//! Recorded input scripts and their replay.

use anyhow::Context;
use glyph_core::{
    ContactId, EngineConfig, GestureEngine, Glyph, GlyphCommand, MemoryGlyphStore, ViewPoint,
    ViewTransform,
};
use serde::{Deserialize, Serialize};

/// One recorded input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    ContactStart { id: ContactId, x: f64, y: f64 },
    ContactMove { id: ContactId, x: f64, y: f64 },
    ContactEnd { id: ContactId },
    Interrupted,
    CompleteHold,
    View { offset_x: f64, offset_y: f64, zoom: f64 },
    /// Selects the n-th glyph in creation order.
    Select { index: usize },
    Deselect,
}

/// Outcome of a replay.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub commands: Vec<GlyphCommand>,
    pub glyphs: Vec<Glyph>,
}

pub fn parse_script(json: &str) -> anyhow::Result<Vec<ScriptEvent>> {
    serde_json::from_str(json).context("failed to parse input script")
}

/// Feeds `events` through a fresh engine backed by an in-memory store.
pub fn replay(events: &[ScriptEvent], config: EngineConfig) -> anyhow::Result<ReplayReport> {
    let store = MemoryGlyphStore::new();
    let mut engine =
        GestureEngine::new(store.clone(), config).context("invalid engine configuration")?;
    let mut commands = Vec::new();

    for event in events {
        match *event {
            ScriptEvent::ContactStart { id, x, y } => {
                commands.extend(engine.on_contact_start(id, ViewPoint::new(x, y)));
            }
            ScriptEvent::ContactMove { id, x, y } => {
                commands.extend(engine.on_contact_move(id, ViewPoint::new(x, y)));
            }
            ScriptEvent::ContactEnd { id } => {
                commands.extend(engine.on_contact_end(id));
            }
            ScriptEvent::Interrupted => engine.on_input_interrupted(),
            ScriptEvent::CompleteHold => commands.extend(engine.complete_hold()),
            ScriptEvent::View {
                offset_x,
                offset_y,
                zoom,
            } => engine.set_view_transform(ViewTransform::new(offset_x, offset_y, zoom)),
            ScriptEvent::Select { index } => match store.glyphs().get(index) {
                Some(glyph) => {
                    store.select(glyph.id);
                }
                None => tracing::warn!("[replay] No glyph at index {}", index),
            },
            ScriptEvent::Deselect => store.deselect(),
        }
    }

    tracing::info!(
        "[replay] {} events produced {} commands",
        events.len(),
        commands.len()
    );

    Ok(ReplayReport {
        commands,
        glyphs: store.glyphs(),
    })
}
