//! Bounded undo/redo history of whole-buffer snapshots.
//!
//! Entries are deep copies, so a restored buffer is byte-identical to the one
//! that was captured. Pushing a new snapshot invalidates the redo stack.

use std::collections::VecDeque;

use crate::buffer::PixelBuffer;

/// Default number of undo steps kept.
pub const DEFAULT_CAPACITY: usize = 30;

/// Undo and redo stacks, most recent entry at the back.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    undo: VecDeque<PixelBuffer>,
    redo: Vec<PixelBuffer>,
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl HistoryStore {
    /// Create an empty history keeping at most `capacity` undo steps.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo: VecDeque::with_capacity(capacity),
            redo: Vec::new(),
            capacity,
        }
    }

    /// Record `buffer` as the state to return to on the next undo.
    pub fn snapshot(&mut self, buffer: &PixelBuffer) {
        self.push_undo(buffer.clone());
        self.redo.clear();
    }

    /// Step back. Returns the previous state, or `None` when there is nothing
    /// to undo (the caller keeps `current`).
    pub fn undo(&mut self, current: &PixelBuffer) -> Option<PixelBuffer> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current.clone());
        log::debug!("undo ({} left, {} redoable)", self.undo.len(), self.redo.len());
        Some(previous)
    }

    /// Step forward again after an undo. Returns `None` when there is nothing
    /// to redo.
    pub fn redo(&mut self, current: &PixelBuffer) -> Option<PixelBuffer> {
        let next = self.redo.pop()?;
        self.push_undo(current.clone());
        log::debug!("redo ({} undoable, {} left)", self.undo.len(), self.redo.len());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry in both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn push_undo(&mut self, buffer: PixelBuffer) {
        self.undo.push_back(buffer);
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
            log::debug!("history full ({}), dropped oldest snapshot", self.capacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(v: u8) -> PixelBuffer {
        PixelBuffer::new(2, 2, Rgba([v, v, v, 255])).unwrap()
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = HistoryStore::default();
        assert_eq!(history.capacity(), DEFAULT_CAPACITY);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(&solid(1)), None);
        assert_eq!(history.redo(&solid(1)), None);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = HistoryStore::default();
        let before = solid(1);
        let after = solid(2);

        history.snapshot(&before);
        let restored = history.undo(&after).unwrap();
        assert_eq!(restored, before);
        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.redo_len(), 1);

        let replayed = history.redo(&restored).unwrap();
        assert_eq!(replayed, after);
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_snapshot_clears_redo() {
        let mut history = HistoryStore::default();
        history.snapshot(&solid(1));
        history.snapshot(&solid(2));
        history.undo(&solid(3)).unwrap();
        assert!(history.can_redo());

        history.snapshot(&solid(4));
        assert!(!history.can_redo());
        assert_eq!(history.redo(&solid(5)), None);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = HistoryStore::with_capacity(3);
        for v in 0..5 {
            history.snapshot(&solid(v));
        }
        assert_eq!(history.undo_len(), 3);

        let mut current = solid(5);
        let mut seen = Vec::new();
        while let Some(prev) = history.undo(&current) {
            seen.push(prev.get(0, 0).unwrap()[0]);
            current = prev;
        }
        assert_eq!(seen, vec![4, 3, 2]);
    }

    #[test]
    fn test_redo_at_capacity_keeps_bound() {
        let mut history = HistoryStore::with_capacity(3);
        for v in 0..5 {
            history.snapshot(&solid(v));
        }

        // Undo twice from state 5, then redo both steps back to it
        let mut current = solid(5);
        for _ in 0..2 {
            current = history.undo(&current).unwrap();
        }
        assert_eq!(current, solid(3));
        for _ in 0..2 {
            current = history.redo(&current).unwrap();
            assert!(history.undo_len() <= history.capacity());
        }
        assert_eq!(current, solid(5));
        assert_eq!(history.undo_len(), 3);
        assert!(!history.can_redo());

        // The surviving undo entries are still the newest three, oldest evicted
        let mut seen = Vec::new();
        while let Some(prev) = history.undo(&current) {
            seen.push(prev.get(0, 0).unwrap()[0]);
            current = prev;
        }
        assert_eq!(seen, vec![4, 3, 2]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = HistoryStore::with_capacity(0);
        history.snapshot(&solid(1));
        history.snapshot(&solid(2));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.undo(&solid(3)), Some(solid(2)));
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut history = HistoryStore::default();
        let mut live = solid(10);
        history.snapshot(&live);
        live.set(0, 0, Rgba([99, 99, 99, 255])).unwrap();

        let restored = history.undo(&live).unwrap();
        assert_eq!(restored, solid(10));
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryStore::default();
        history.snapshot(&solid(1));
        history.snapshot(&solid(2));
        history.undo(&solid(3));
        history.clear();
        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.redo_len(), 0);
    }
}
