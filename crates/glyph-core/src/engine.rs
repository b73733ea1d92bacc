//! Gesture engine: routes contact events to the hold detector or the
//! two-contact interpreter and dispatches the resulting glyph commands.

use crate::config::EngineConfig;
use crate::error::{ConfigError, GestureError};
use crate::hold::HoldDetector;
use crate::interpreter::GestureInterpreter;
use crate::order::{Segment, connector_segments, order_by_angle};
use crate::store::{GlyphCommand, GlyphStore};
use crate::tracker::{ContactId, TouchTracker};
use crate::view::{CONTACT_RADIUS_PX, ViewPoint, ViewTransform, WorldPoint};

/// Which behavior the current contact set drives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GestureMode {
    /// No contacts, or a single contact that is not holding.
    #[default]
    Idle,
    /// One contact holding to create a glyph.
    Holding { anchor: WorldPoint },
    /// Two contacts scaling and rotating the selected glyph (ordered pair).
    Manipulating { p1: WorldPoint, p2: WorldPoint },
    /// More than two contacts; nothing is interpreted until the count drops.
    Suspended { contacts: usize },
}

/// Single-threaded gesture pipeline.
///
/// Each input call is processed to completion and returns the commands that
/// were dispatched to the store for it.
#[derive(Debug)]
pub struct GestureEngine<S> {
    config: EngineConfig,
    interpreter: GestureInterpreter,
    tracker: TouchTracker,
    hold: HoldDetector,
    transform: ViewTransform,
    mode: GestureMode,
    /// Set while two contacts are blocked by an unusable transform.
    transform_blocked: bool,
    store: S,
}

impl<S: GlyphStore> GestureEngine<S> {
    /// Builds an engine, rejecting a configuration that fails validation.
    pub fn new(store: S, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            interpreter: GestureInterpreter::new(config.gesture)?,
            config,
            tracker: TouchTracker::new(),
            hold: HoldDetector::new(),
            transform: ViewTransform::default(),
            mode: GestureMode::Idle,
            transform_blocked: false,
            store,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn contact_count(&self) -> usize {
        self.tracker.len()
    }

    pub fn view_transform(&self) -> ViewTransform {
        self.transform
    }

    /// Replaces the pan/zoom snapshot used for every later mapping.
    pub fn set_view_transform(&mut self, transform: ViewTransform) {
        if let Err(err) = transform.validate() {
            tracing::warn!("[gesture] {}", err);
        }
        self.transform = transform;
        self.transform_blocked = false;
    }

    /// A contact touched down.
    pub fn on_contact_start(&mut self, id: ContactId, point: ViewPoint) -> Vec<GlyphCommand> {
        let is_new = self.tracker.get(id).is_none();
        self.tracker.upsert(id, point);

        // a single fresh contact with nothing selected starts a hold
        if is_new && self.tracker.len() == 1 && self.store.selected().is_none() {
            if let Err(err) = self.hold.begin(point, &self.transform) {
                tracing::debug!("[gesture] Hold not started: {}", err);
            }
        }

        self.refresh()
    }

    /// A tracked contact moved. Moves of untracked ids (hovering pointers) are ignored.
    pub fn on_contact_move(&mut self, id: ContactId, point: ViewPoint) -> Vec<GlyphCommand> {
        if self.tracker.get(id).is_none() {
            return Vec::new();
        }
        self.tracker.upsert(id, point);
        self.refresh()
    }

    /// A contact lifted or was cancelled.
    pub fn on_contact_end(&mut self, id: ContactId) -> Vec<GlyphCommand> {
        if !self.tracker.remove(id) {
            return Vec::new();
        }
        self.refresh()
    }

    /// The input surface was interrupted (hidden, frozen, OS-cancelled).
    /// Drops every contact and any gesture in progress.
    pub fn on_input_interrupted(&mut self) {
        tracing::debug!(
            "[gesture] Input interrupted with {} contacts",
            self.tracker.len()
        );
        self.tracker.clear();
        self.hold.cancel();
        self.mode = GestureMode::Idle;
    }

    /// Current contacts in world space, ordered for drawing.
    pub fn ordered_world_points(&self) -> Vec<WorldPoint> {
        match self.world_points() {
            Ok(points) => order_by_angle(&points),
            Err(err) => {
                tracing::warn!("[gesture] {}", err);
                Vec::new()
            }
        }
    }

    /// Lines joining the ordered contacts, trimmed to the contact circles.
    pub fn connector_segments(&self) -> Vec<Segment> {
        match self.transform.world_length(CONTACT_RADIUS_PX) {
            Ok(radius) => connector_segments(&self.ordered_world_points(), radius),
            Err(err) => {
                tracing::warn!("[gesture] {}", err);
                Vec::new()
            }
        }
    }

    pub fn is_hold_active(&self) -> bool {
        self.hold.is_active()
    }

    pub fn hold_anchor(&self) -> Option<WorldPoint> {
        self.hold.anchor()
    }

    /// The presentation layer decided the hold lasted long enough.
    ///
    /// Creates a glyph at the anchor with the default font size and every
    /// configured axis at its default. Does nothing unless a hold is active.
    pub fn complete_hold(&mut self) -> Vec<GlyphCommand> {
        if self.store.selected().is_some() && self.hold.cancel() {
            tracing::debug!("[gesture] Selection appeared during hold, not creating");
            self.refresh();
            return Vec::new();
        }
        let Some(anchor) = self.hold.complete() else {
            return Vec::new();
        };

        let command = GlyphCommand::Create {
            font_size: self.config.font.default_font_size,
            x: anchor.x,
            y: anchor.y,
            axes: self.config.font.axis_defaults(),
        };
        let applied = self.dispatch(vec![command]);
        self.refresh();
        applied
    }

    fn world_points(&self) -> Result<Vec<WorldPoint>, GestureError> {
        self.tracker
            .points()
            .into_iter()
            .map(|point| self.transform.to_world(point))
            .collect()
    }

    /// Re-derives the mode from the contact count and runs the active sub-engine.
    fn refresh(&mut self) -> Vec<GlyphCommand> {
        match self.tracker.len() {
            0 => {
                self.hold.cancel();
                self.set_mode(GestureMode::Idle);
                Vec::new()
            }
            1 => {
                // a selection made mid-hold reserves the contact for other interaction
                if self.hold.is_active() && self.store.selected().is_some() {
                    self.hold.cancel();
                }
                let mode = match self.hold.anchor() {
                    Some(anchor) => GestureMode::Holding { anchor },
                    None => GestureMode::Idle,
                };
                self.set_mode(mode);
                Vec::new()
            }
            2 => {
                self.hold.cancel();
                let points = match self.world_points() {
                    Ok(points) => points,
                    Err(err) => {
                        if !self.transform_blocked {
                            tracing::warn!("[gesture] {}, ignoring contacts", err);
                            self.transform_blocked = true;
                        }
                        self.set_mode(GestureMode::Idle);
                        return Vec::new();
                    }
                };
                self.transform_blocked = false;
                let ordered = order_by_angle(&points);
                let (p1, p2) = (ordered[0], ordered[1]);
                self.set_mode(GestureMode::Manipulating { p1, p2 });
                self.manipulate(p1, p2)
            }
            contacts => {
                self.hold.cancel();
                if !matches!(self.mode, GestureMode::Suspended { .. }) {
                    tracing::warn!(
                        "[gesture] {}, ignoring until released",
                        GestureError::UnexpectedContactCount(contacts)
                    );
                }
                self.set_mode(GestureMode::Suspended { contacts });
                Vec::new()
            }
        }
    }

    fn set_mode(&mut self, mode: GestureMode) {
        if std::mem::discriminant(&self.mode) != std::mem::discriminant(&mode) {
            tracing::debug!("[gesture] Mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    fn manipulate(&mut self, p1: WorldPoint, p2: WorldPoint) -> Vec<GlyphCommand> {
        let Some(selected) = self.store.selected() else {
            return Vec::new();
        };
        let update = self.interpreter.evaluate(p1, p2, &selected);
        self.dispatch(update.into_commands(selected.id))
    }

    fn dispatch(&mut self, commands: Vec<GlyphCommand>) -> Vec<GlyphCommand> {
        let mut applied = Vec::with_capacity(commands.len());
        for command in commands {
            match self.store.apply(&command) {
                Ok(_) => {
                    tracing::debug!("[gesture] Dispatched {:?}", command);
                    applied.push(command);
                }
                Err(GestureError::StaleSelection(id)) => {
                    tracing::debug!("[gesture] Dropping update for removed glyph {}", id);
                }
                Err(err) => {
                    tracing::warn!("[gesture] Store rejected {:?}: {}", command, err);
                }
            }
        }
        applied
    }
}
