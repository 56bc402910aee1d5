//! Per-listing probe locks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

type Slot = Arc<Mutex<()>>;

/// One lock per listing id currently being resolved.
///
/// Requests for the same id queue on one slot; different ids never share a
/// slot. A slot is dropped from the map when its last holder releases it.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    slots: Mutex<HashMap<String, Slot>>,
}

impl InFlight {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Slot for `listing_id`, shared with every concurrent caller for that id.
    /// Hand it back through [`InFlight::release`].
    pub(crate) fn acquire(&self, listing_id: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(listing_id.to_string()).or_default())
    }

    /// Drop the caller's handle; the last one out removes the map entry.
    pub(crate) fn release(&self, listing_id: &str, slot: Slot) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        drop(slot);
        // Clones are only taken under this lock, so a count of 1 means the map is the sole owner.
        if slots
            .get(listing_id)
            .is_some_and(|s| Arc::strong_count(s) == 1)
        {
            slots.remove(listing_id);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
