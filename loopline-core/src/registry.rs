//! Sibling registry: the ordered set of loops and the current one.
//!
//! Loops live in an owned arena keyed by `LoopId`. Insertion order is kept
//! because the removal protocol hands "current" to the following sibling.

use crate::range_track::RangeTrack;

/// Stable identity of a registered loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoopId(pub u64);

impl std::fmt::Display for LoopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: LoopId,
    track: RangeTrack,
}

/// Outcome of the removal protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The loop was erased and `next_current` is now current.
    Removed { next_current: LoopId },
    /// The loop is the last in order; nothing changed.
    LastInOrder,
    /// No loop with that id is registered.
    NotFound,
}

/// Ordered collection of loops with a single "current" loop.
#[derive(Debug, Clone, Default)]
pub struct LoopRegistry {
    entries: Vec<Entry>,
    current: Option<LoopId>,
    next_id: u64,
}

impl LoopRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a loop. The first loop registered becomes current.
    pub fn push(&mut self, track: RangeTrack) -> LoopId {
        let id = LoopId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, track });
        if self.current.is_none() {
            self.current = Some(id);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: LoopId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: LoopId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: LoopId) -> Option<&RangeTrack> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.track)
    }

    pub fn get_mut(&mut self, id: LoopId) -> Option<&mut RangeTrack> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.track)
    }

    /// Ids in registration order.
    pub fn ids(&self) -> Vec<LoopId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LoopId, &RangeTrack)> {
        self.entries.iter().map(|e| (e.id, &e.track))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (LoopId, &mut RangeTrack)> {
        self.entries.iter_mut().map(|e| (e.id, &mut e.track))
    }

    pub fn current(&self) -> Option<LoopId> {
        self.current
    }

    pub fn current_track(&self) -> Option<&RangeTrack> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn current_track_mut(&mut self) -> Option<&mut RangeTrack> {
        let id = self.current?;
        self.get_mut(id)
    }

    /// Make `id` current. Returns false (and changes nothing) for unknown ids.
    pub fn set_current(&mut self, id: LoopId) -> bool {
        if self.contains(id) {
            self.current = Some(id);
            true
        } else {
            false
        }
    }

    /// Move "current" to the next loop in order, wrapping around.
    pub fn cycle_current(&mut self) -> Option<LoopId> {
        let next = match self.current.and_then(|id| self.position(id)) {
            Some(pos) => self.entries.get((pos + 1) % self.entries.len()),
            None => self.entries.first(),
        }
        .map(|e| e.id);
        self.current = next;
        next
    }

    /// Removal protocol: if `id` has a following sibling, that sibling becomes
    /// current and `id` is erased. The last loop in order is never removed.
    ///
    /// The scan stops at the first match and the erase happens only after the
    /// scan is finished.
    pub fn remove(&mut self, id: LoopId) -> Removal {
        let mut matched = None;
        for (pos, entry) in self.entries.iter().enumerate() {
            if entry.id == id {
                matched = Some(pos);
                break;
            }
        }

        let Some(pos) = matched else {
            return Removal::NotFound;
        };
        let Some(next) = self.entries.get(pos + 1).map(|e| e.id) else {
            return Removal::LastInOrder;
        };

        self.current = Some(next);
        self.entries.remove(pos);
        Removal::Removed { next_current: next }
    }
}
