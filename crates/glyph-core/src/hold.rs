//! Hold-to-create detection.
//!
//! `Idle -> Holding -> (completed | cancelled) -> Idle`. The hold duration is
//! judged by the presentation layer, which calls [`HoldDetector::complete`]
//! once it is satisfied; this module owns no timers.

use crate::error::GestureError;
use crate::view::{ViewPoint, ViewTransform, WorldPoint};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum HoldState {
    #[default]
    Idle,
    /// The anchor is fixed at the contact's world position when the hold began.
    Holding { anchor: WorldPoint },
}

#[derive(Debug, Clone, Default)]
pub struct HoldDetector {
    state: HoldState,
}

impl HoldDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, HoldState::Holding { .. })
    }

    pub fn anchor(&self) -> Option<WorldPoint> {
        match self.state {
            HoldState::Holding { anchor } => Some(anchor),
            HoldState::Idle => None,
        }
    }

    /// Starts holding at `point`.
    ///
    /// If the point cannot be mapped to world space the detector stays idle.
    pub fn begin(
        &mut self,
        point: ViewPoint,
        transform: &ViewTransform,
    ) -> Result<(), GestureError> {
        match transform.to_world(point) {
            Ok(anchor) => {
                tracing::debug!("[hold] Holding at ({:.2}, {:.2})", anchor.x, anchor.y);
                self.state = HoldState::Holding { anchor };
                Ok(())
            }
            Err(err) => {
                tracing::warn!("[hold] Not starting hold: {}", err);
                self.state = HoldState::Idle;
                Err(err)
            }
        }
    }

    /// Abandons an active hold. Returns `true` if one was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        if was_active {
            tracing::debug!("[hold] Cancelled");
        }
        self.state = HoldState::Idle;
        was_active
    }

    /// Finishes an active hold and returns its anchor.
    pub fn complete(&mut self) -> Option<WorldPoint> {
        let anchor = self.anchor();
        self.state = HoldState::Idle;
        anchor
    }
}
