//! Bounded snapshot history
//!
//! Snapshots are kept in frame order in a ring buffer. When the buffer is full
//! the oldest snapshot is evicted, which limits how far back the controller can
//! step. Stepping forward from an earlier frame discards every later snapshot,
//! so the history is always a single timeline.

use crate::ball::Ball;
use crate::world::World;
use std::collections::VecDeque;

/// Immutable copy of the balls at one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    frame: u64,
    time: f64,
    balls: Vec<Ball>,
}

impl Snapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            frame: world.frame,
            time: world.time,
            balls: world.balls.clone(),
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Overwrite the world's balls and clock with this snapshot
    pub fn restore_into(&self, world: &mut World) {
        world.balls.clone_from(&self.balls);
        world.frame = self.frame;
        world.time = self.time;
    }
}

#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Append a snapshot, evicting the oldest one when full
    ///
    /// Frames must be recorded in increasing order.
    pub fn record(&mut self, snapshot: Snapshot) {
        debug_assert!(self
            .latest()
            .map_or(true, |last| last.frame < snapshot.frame));
        if self.snapshots.len() == self.capacity {
            if let Some(evicted) = self.snapshots.pop_front() {
                log::debug!("history full, evicting frame {}", evicted.frame);
            }
        }
        self.snapshots.push_back(snapshot);
    }

    /// Drop every snapshot newer than `frame`
    pub fn truncate_after(&mut self, frame: u64) {
        let keep = self.snapshots.partition_point(|s| s.frame <= frame);
        if keep < self.snapshots.len() {
            log::debug!(
                "discarding {} snapshots after frame {}",
                self.snapshots.len() - keep,
                frame
            );
            self.snapshots.truncate(keep);
        }
    }

    pub fn get(&self, frame: u64) -> Option<&Snapshot> {
        let first = self.snapshots.front()?.frame;
        let offset = frame.checked_sub(first)?;
        let snapshot = self.snapshots.get(offset as usize)?;
        debug_assert_eq!(snapshot.frame, frame);
        Some(snapshot)
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    pub fn earliest_frame(&self) -> Option<u64> {
        self.snapshots.front().map(|s| s.frame)
    }
}
