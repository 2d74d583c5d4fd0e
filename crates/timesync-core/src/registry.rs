//! Insertion-ordered store of named timeframes.

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use crate::error::TimeSyncError;
use crate::timeframe::TimeFrame;

/// Outcome of [`Registry::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The id is taken; the registry is unchanged. Carries the frame that
    /// currently holds the id.
    Conflict(TimeFrame),
}

/// Mapping of id to [`TimeFrame`] that remembers insertion order.
///
/// Order decides listing and visualization row order only; intersection
/// results never depend on it. Ids are matched exactly (case-sensitive).
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: IndexMap<String, TimeFrame>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `frame` under `id` unless the id is already taken.
    pub fn add(&mut self, id: &str, frame: TimeFrame) -> AddOutcome {
        match self.entries.entry(id.to_string()) {
            Entry::Occupied(existing) => {
                debug!(id, "add rejected, id already present");
                AddOutcome::Conflict(existing.get().clone())
            }
            Entry::Vacant(slot) => {
                debug!(id, "timeframe added");
                slot.insert(frame);
                AddOutcome::Added
            }
        }
    }

    /// Swap the frame stored under `id`, keeping its position, and return
    /// the old frame.
    pub fn replace(&mut self, id: &str, frame: TimeFrame) -> Result<TimeFrame, TimeSyncError> {
        let slot = self
            .entries
            .get_mut(id)
            .ok_or_else(|| TimeSyncError::UnknownId(id.to_string()))?;
        debug!(id, "timeframe replaced");
        Ok(std::mem::replace(slot, frame))
    }

    /// Remove `id`; the remaining entries keep their relative order.
    pub fn remove(&mut self, id: &str) -> Result<TimeFrame, TimeSyncError> {
        let frame = self
            .entries
            .shift_remove(id)
            .ok_or_else(|| TimeSyncError::UnknownId(id.to_string()))?;
        debug!(id, "timeframe removed");
        Ok(frame)
    }

    /// Drop every frame, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        debug!(removed, "registry cleared");
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&TimeFrame> {
        self.entries.get(id)
    }

    /// Entries in insertion order.
    pub fn list(&self) -> impl Iterator<Item = (&str, &TimeFrame)> {
        self.entries.iter().map(|(id, frame)| (id.as_str(), frame))
    }

    /// Frames in insertion order, without ids.
    pub fn frames(&self) -> impl Iterator<Item = &TimeFrame> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
