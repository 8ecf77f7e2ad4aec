//! Bounded rolling history of forwarded samples.
//!
//! Retains the most recent governor-accepted samples for the periodic
//! diagnostic report. Samples that the governor drops are never buffered, so
//! the history reflects what was actually forwarded downstream.

use ringbuffer::{AllocRingBuffer, RingBuffer};

use crate::types::{NormalizedOrientation, RawFrame};

/// One forwarded sample: the decoded frame and what was sent for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    pub frame: RawFrame,
    pub orientation: NormalizedOrientation,
}

/// Fixed-capacity ring of the most recent forwarded samples.
///
/// Pushing onto a full ring evicts the oldest entry; length never exceeds
/// capacity and iteration order is arrival order.
#[derive(Debug)]
pub struct History {
    entries: AllocRingBuffer<HistoryEntry>,
}

impl History {
    /// Create a history retaining up to `capacity` entries.
    ///
    /// Capacity must be non-zero; the configuration layer enforces that
    /// before construction.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: AllocRingBuffer::new(capacity) }
    }

    /// Append a forwarded sample, evicting the oldest if full.
    pub fn push(&mut self, frame: RawFrame, orientation: NormalizedOrientation) {
        self.entries.push(HistoryEntry { frame, orientation });
    }

    /// Current entries, oldest first. Does not mutate the history.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.iter().copied().collect()
    }

    /// Most recently forwarded sample, if any.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.iter().last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: f32) -> (RawFrame, NormalizedOrientation) {
        let frame = RawFrame { timestamp: n as f64, pitch: n, yaw: -n, roll: 0.0 };
        (frame, NormalizedOrientation::from_frame(&frame))
    }

    #[test]
    fn starts_empty() {
        let history = History::with_capacity(10);
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 10);
        assert!(history.latest().is_none());
        assert!(history.snapshot().is_empty());
    }

    #[test]
    fn overflow_evicts_oldest_first() {
        let mut history = History::with_capacity(10);
        for n in 0..15 {
            let (frame, orientation) = sample(n as f32);
            history.push(frame, orientation);
        }

        // Exactly the last 10, oldest first.
        assert_eq!(history.len(), 10);
        let snapshot = history.snapshot();
        assert_eq!(snapshot.len(), 10);
        for (i, entry) in snapshot.iter().enumerate() {
            assert_eq!(entry.frame.pitch, (i + 5) as f32);
        }
        assert_eq!(history.latest().unwrap().frame.pitch, 14.0);
    }

    #[test]
    fn snapshot_does_not_mutate() {
        let mut history = History::with_capacity(3);
        let (frame, orientation) = sample(1.0);
        history.push(frame, orientation);

        let before = history.snapshot();
        let again = history.snapshot();
        assert_eq!(before, again);
        assert_eq!(history.len(), 1);
    }
}
