//! Active contact tracking keyed by touch/pointer identifier.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::view::ViewPoint;

/// Device-assigned touch or pointer identifier, stable while the contact is pressed.
pub type ContactId = i32;

/// Latest view-space position of every active contact.
///
/// Entries keep their first-contact order. Order carries no gesture meaning,
/// but it is the tie-break the point orderer falls back on.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    contacts: Vec<(ContactId, ViewPoint)>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a contact, or moves it if `id` is already tracked.
    pub fn upsert(&mut self, id: ContactId, point: ViewPoint) {
        match self.contacts.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, position)) => *position = point,
            None => self.contacts.push((id, point)),
        }
    }

    /// Removes a contact. Returns `false` if `id` was not tracked.
    pub fn remove(&mut self, id: ContactId) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|(existing, _)| *existing != id);
        self.contacts.len() != before
    }

    /// Drops every contact. Used when the input surface is interrupted.
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: ContactId) -> Option<ViewPoint> {
        self.contacts
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, point)| *point)
    }

    /// Copy of the current contacts in first-contact order.
    pub fn snapshot(&self) -> Vec<(ContactId, ViewPoint)> {
        self.contacts.clone()
    }

    /// Positions only, in first-contact order.
    pub fn points(&self) -> Vec<ViewPoint> {
        self.contacts.iter().map(|(_, point)| *point).collect()
    }
}

/// Cloneable handle to a tracker fed from more than one thread.
///
/// Writers are serialized by the lock; [`SharedTracker::snapshot`] reads the
/// count and the points under a single guard so they always agree.
#[derive(Debug, Clone, Default)]
pub struct SharedTracker {
    inner: Arc<RwLock<TouchTracker>>,
}

impl SharedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, id: ContactId, point: ViewPoint) {
        self.inner.write().upsert(id, point);
    }

    pub fn remove(&self, id: ContactId) -> bool {
        self.inner.write().remove(id)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn snapshot(&self) -> Vec<(ContactId, ViewPoint)> {
        self.inner.read().snapshot()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
