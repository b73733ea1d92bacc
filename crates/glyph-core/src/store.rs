//! Glyph object store interface and an in-memory implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GestureError;

/// Unique identifier for a glyph.
pub type GlyphId = Uuid;

/// Typographic properties of a glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphProperties {
    pub font_size: f64,
    /// Font-variation axis values keyed by axis name.
    pub axes: BTreeMap<String, f64>,
}

/// Partial update of [`GlyphProperties`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphPropertiesPatch {
    pub font_size: Option<f64>,
}

impl GlyphPropertiesPatch {
    pub fn font_size(font_size: f64) -> Self {
        Self {
            font_size: Some(font_size),
        }
    }

    fn apply_to(&self, properties: &mut GlyphProperties) {
        if let Some(font_size) = self.font_size {
            properties.font_size = font_size;
        }
    }
}

/// A glyph placed on the canvas (world coordinates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub id: GlyphId,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub properties: GlyphProperties,
}

/// The transform of the currently selected glyph, as read by the gesture engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedGlyph {
    pub id: GlyphId,
    pub font_size: f64,
    pub rotation_degrees: f64,
}

/// A store call proposed by the gesture engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GlyphCommand {
    UpdateProperties {
        id: GlyphId,
        patch: GlyphPropertiesPatch,
    },
    UpdateRotation {
        id: GlyphId,
        degrees: f64,
        extra: f64,
    },
    Create {
        font_size: f64,
        x: f64,
        y: f64,
        axes: BTreeMap<String, f64>,
    },
}

/// The object store the gesture engine writes to.
pub trait GlyphStore {
    /// The selected glyph, if any.
    fn selected(&self) -> Option<SelectedGlyph>;

    /// Fails with [`GestureError::StaleSelection`] if `id` no longer exists.
    fn update_properties(
        &mut self,
        id: GlyphId,
        patch: &GlyphPropertiesPatch,
    ) -> Result<(), GestureError>;

    /// Sets the rotation in degrees. `extra` is forwarded as-is; the engine passes `0.0`.
    fn update_rotation(&mut self, id: GlyphId, degrees: f64, extra: f64)
    -> Result<(), GestureError>;

    fn create(&mut self, font_size: f64, x: f64, y: f64, axes: BTreeMap<String, f64>)
    -> GlyphId;

    /// Executes a command. Returns the new id for [`GlyphCommand::Create`].
    fn apply(&mut self, command: &GlyphCommand) -> Result<Option<GlyphId>, GestureError> {
        match command {
            GlyphCommand::UpdateProperties { id, patch } => {
                self.update_properties(*id, patch).map(|()| None)
            }
            GlyphCommand::UpdateRotation { id, degrees, extra } => {
                self.update_rotation(*id, *degrees, *extra).map(|()| None)
            }
            GlyphCommand::Create {
                font_size,
                x,
                y,
                axes,
            } => Ok(Some(self.create(*font_size, *x, *y, axes.clone()))),
        }
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    glyphs: Vec<Glyph>,
    selected: Option<GlyphId>,
}

impl StoreInner {
    fn get_mut(&mut self, id: GlyphId) -> Result<&mut Glyph, GestureError> {
        self.glyphs
            .iter_mut()
            .find(|glyph| glyph.id == id)
            .ok_or(GestureError::StaleSelection(id))
    }
}

/// Glyphs kept in memory, in creation order.
///
/// Clones share the same storage, so a caller can hand one clone to the
/// engine and keep another for selection and inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryGlyphStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MemoryGlyphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all glyphs in creation order.
    pub fn glyphs(&self) -> Vec<Glyph> {
        self.inner.read().glyphs.clone()
    }

    pub fn get(&self, id: GlyphId) -> Option<Glyph> {
        self.inner
            .read()
            .glyphs
            .iter()
            .find(|glyph| glyph.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().glyphs.is_empty()
    }

    /// Selects `id`. Returns `false` (and leaves the selection alone) if it does not exist.
    pub fn select(&self, id: GlyphId) -> bool {
        let mut inner = self.inner.write();
        if inner.glyphs.iter().any(|glyph| glyph.id == id) {
            inner.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn deselect(&self) {
        self.inner.write().selected = None;
    }

    pub fn selected_id(&self) -> Option<GlyphId> {
        self.inner.read().selected
    }

    /// Deletes a glyph, clearing the selection if it pointed at it.
    pub fn remove(&self, id: GlyphId) -> bool {
        let mut inner = self.inner.write();
        let before = inner.glyphs.len();
        inner.glyphs.retain(|glyph| glyph.id != id);
        if inner.selected == Some(id) {
            inner.selected = None;
        }
        inner.glyphs.len() != before
    }
}

impl GlyphStore for MemoryGlyphStore {
    fn selected(&self) -> Option<SelectedGlyph> {
        let inner = self.inner.read();
        let id = inner.selected?;
        let glyph = inner.glyphs.iter().find(|glyph| glyph.id == id)?;
        Some(SelectedGlyph {
            id,
            font_size: glyph.properties.font_size,
            rotation_degrees: glyph.rotation,
        })
    }

    fn update_properties(
        &mut self,
        id: GlyphId,
        patch: &GlyphPropertiesPatch,
    ) -> Result<(), GestureError> {
        let mut inner = self.inner.write();
        patch.apply_to(&mut inner.get_mut(id)?.properties);
        Ok(())
    }

    fn update_rotation(
        &mut self,
        id: GlyphId,
        degrees: f64,
        _extra: f64,
    ) -> Result<(), GestureError> {
        let mut inner = self.inner.write();
        inner.get_mut(id)?.rotation = degrees;
        Ok(())
    }

    fn create(
        &mut self,
        font_size: f64,
        x: f64,
        y: f64,
        axes: BTreeMap<String, f64>,
    ) -> GlyphId {
        let id = Uuid::new_v4();
        let mut inner = self.inner.write();
        inner.glyphs.push(Glyph {
            id,
            x,
            y,
            rotation: 0.0,
            properties: GlyphProperties { font_size, axes },
        });
        inner.selected = Some(id);
        tracing::info!("[store] Created glyph {} at ({}, {})", id, x, y);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes() -> BTreeMap<String, f64> {
        BTreeMap::from([("wght".to_string(), 400.0), ("wdth".to_string(), 100.0)])
    }

    #[test]
    fn test_create_selects_new_glyph() {
        let mut store = MemoryGlyphStore::new();
        let id = store.create(70.0, 20.0, 30.0, axes());

        let selected = store.selected().unwrap();
        assert_eq!(selected.id, id);
        assert!((selected.font_size - 70.0).abs() < f64::EPSILON);
        assert!(selected.rotation_degrees.abs() < f64::EPSILON);
        assert_eq!(store.get(id).unwrap().properties.axes, axes());
    }

    #[test]
    fn test_patch_leaves_missing_fields() {
        let mut store = MemoryGlyphStore::new();
        let id = store.create(70.0, 0.0, 0.0, axes());

        store
            .update_properties(id, &GlyphPropertiesPatch::default())
            .unwrap();
        assert!((store.get(id).unwrap().properties.font_size - 70.0).abs() < f64::EPSILON);

        store
            .update_properties(id, &GlyphPropertiesPatch::font_size(120.0))
            .unwrap();
        let glyph = store.get(id).unwrap();
        assert!((glyph.properties.font_size - 120.0).abs() < f64::EPSILON);
        assert_eq!(glyph.properties.axes, axes());
    }

    #[test]
    fn test_update_missing_glyph_is_stale() {
        let mut store = MemoryGlyphStore::new();
        let id = store.create(70.0, 0.0, 0.0, BTreeMap::new());
        assert!(store.remove(id));

        assert_eq!(
            store.update_rotation(id, 45.0, 0.0),
            Err(GestureError::StaleSelection(id))
        );
        assert_eq!(
            store.update_properties(id, &GlyphPropertiesPatch::font_size(10.0)),
            Err(GestureError::StaleSelection(id))
        );
        assert!(store.selected().is_none());
        assert!(store.selected_id().is_none());
    }

    #[test]
    fn test_select_and_deselect() {
        let mut store = MemoryGlyphStore::new();
        let first = store.create(70.0, 0.0, 0.0, BTreeMap::new());
        let second = store.create(70.0, 5.0, 5.0, BTreeMap::new());
        assert_eq!(store.selected_id(), Some(second));

        assert!(store.select(first));
        assert_eq!(store.selected().unwrap().id, first);
        assert!(!store.select(Uuid::new_v4()));
        assert_eq!(store.selected_id(), Some(first));

        store.deselect();
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_apply_dispatches_commands() {
        let mut store = MemoryGlyphStore::new();
        let created = store
            .apply(&GlyphCommand::Create {
                font_size: 70.0,
                x: 1.0,
                y: 2.0,
                axes: BTreeMap::new(),
            })
            .unwrap()
            .unwrap();

        store
            .apply(&GlyphCommand::UpdateRotation {
                id: created,
                degrees: 8.5,
                extra: 0.0,
            })
            .unwrap();

        let glyph = store.get(created).unwrap();
        assert!((glyph.rotation - 8.5).abs() < f64::EPSILON);
        assert!((glyph.x - 1.0).abs() < f64::EPSILON);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clones_share_storage() {
        let mut store = MemoryGlyphStore::new();
        let observer = store.clone();
        store.create(70.0, 0.0, 0.0, BTreeMap::new());
        assert_eq!(observer.len(), 1);
        assert!(!observer.is_empty());
    }
}
