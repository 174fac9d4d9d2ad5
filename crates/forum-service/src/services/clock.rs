//! Wall-clock source for activity slots

use std::sync::atomic::{AtomicU16, Ordering};

use forum_core::ActivitySlot;

/// Source of the current activity slot
pub trait Clock: Send + Sync {
    fn now_slot(&self) -> ActivitySlot;
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_slot(&self) -> ActivitySlot {
        ActivitySlot::now_local()
    }
}

/// Manually driven clock for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    slot: AtomicU16,
}

impl FixedClock {
    pub fn new(slot: ActivitySlot) -> Self {
        Self {
            slot: AtomicU16::new(slot.value()),
        }
    }

    /// Jump to a given slot
    pub fn set(&self, slot: ActivitySlot) {
        self.slot.store(slot.value(), Ordering::SeqCst);
    }

    /// Move forward by `minutes`, wrapping at midnight
    pub fn advance(&self, minutes: u32) {
        let current = self.now_slot().minute_of_day();
        let next = (current + minutes) % (24 * 60);
        // hour < 24 and minute < 60 by construction
        let slot = ActivitySlot::from_time(next / 60, next % 60).unwrap_or(ActivitySlot::MIDNIGHT);
        self.set(slot);
    }
}

impl Clock for FixedClock {
    fn now_slot(&self) -> ActivitySlot {
        ActivitySlot::new(self.slot.load(Ordering::SeqCst)).unwrap_or(ActivitySlot::MIDNIGHT)
    }
}
