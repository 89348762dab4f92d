use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bounded undo/redo stack over successive snapshots.
///
/// Generic over the snapshot type; the annotation layer commits
/// [`DrawingCollection`](crate::core::DrawingCollection) values. Both sides
/// are bounded deques, so the depth limit is structural: pushing past it
/// silently drops the oldest entry on that side.
///
/// `present` is always defined. Committing is the only operation that clears
/// the redo side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History<T> {
    past: VecDeque<T>,
    present: T,
    future: VecDeque<T>,
    limit: usize,
}

impl<T> History<T> {
    /// Creates a history seeded with `initial` and empty undo/redo sides.
    #[must_use]
    pub fn new(initial: T, limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial,
            future: VecDeque::new(),
            limit,
        }
    }

    #[must_use]
    pub fn present(&self) -> &T {
        &self.present
    }

    #[must_use]
    pub fn into_present(self) -> T {
        self.present
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Commits a new present snapshot.
    ///
    /// The previous present moves onto the undo side (trimmed from the
    /// oldest end) and the redo side is cleared.
    pub fn commit(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push_back(previous);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
        debug!(undo_depth = self.past.len(), "history commit");
    }

    /// Steps back one snapshot. Returns `false` without touching state when
    /// there is nothing to undo, so it is safe to call unconditionally.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let displaced = std::mem::replace(&mut self.present, previous);
        self.future.push_front(displaced);
        self.future.truncate(self.limit);
        true
    }

    /// Steps forward one snapshot. Returns `false` without touching state
    /// when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let displaced = std::mem::replace(&mut self.present, next);
        self.past.push_back(displaced);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        true
    }
}
