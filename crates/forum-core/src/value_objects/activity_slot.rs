//! Activity slot - coarse wall-clock time of day
//!
//! Sessions record when they were last seen as `hour * 100 + minute`
//! (so 23:55 is `2355`). The encoding carries no date, which is enough for
//! "seen in the last few minutes" checks as long as the difference is taken
//! modulo one day.

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error when building an [`ActivitySlot`] from a raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("hour out of range: {0}")]
    Hour(u32),

    #[error("minute out of range: {0}")]
    Minute(u32),

    #[error("slot value out of range: {0}")]
    Raw(i64),
}

/// `hour * 100 + minute` time-of-day stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ActivitySlot(u16);

impl ActivitySlot {
    /// 00:00
    pub const MIDNIGHT: Self = Self(0);

    /// Build from an hour (0-23) and minute (0-59)
    pub fn from_time(hour: u32, minute: u32) -> Result<Self, SlotError> {
        if hour >= 24 {
            return Err(SlotError::Hour(hour));
        }
        if minute >= 60 {
            return Err(SlotError::Minute(minute));
        }
        Ok(Self((hour * 100 + minute) as u16))
    }

    /// Build from the packed `hhmm` value
    pub fn new(raw: u16) -> Result<Self, SlotError> {
        Self::from_time(u32::from(raw / 100), u32::from(raw % 100))
    }

    /// The slot for the current local wall-clock time
    pub fn now_local() -> Self {
        let now = Local::now();
        Self((now.hour() * 100 + now.minute()) as u16)
    }

    /// Packed `hhmm` value
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn hour(self) -> u32 {
        (self.0 / 100) as u32
    }

    #[inline]
    pub const fn minute(self) -> u32 {
        (self.0 % 100) as u32
    }

    /// Minutes elapsed since midnight
    #[inline]
    pub const fn minute_of_day(self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Minutes elapsed from `earlier` to `self`.
    ///
    /// When `self` is numerically before `earlier` the clock is assumed to
    /// have wrapped past midnight, so 00:05 is 10 minutes after 23:55.
    pub const fn minutes_since(self, earlier: Self) -> u32 {
        let now = self.minute_of_day();
        let then = earlier.minute_of_day();
        if now >= then {
            now - then
        } else {
            MINUTES_PER_DAY + now - then
        }
    }
}

impl fmt::Display for ActivitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<u16> for ActivitySlot {
    type Error = SlotError;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl TryFrom<i32> for ActivitySlot {
    type Error = SlotError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        let raw = u16::try_from(raw).map_err(|_| SlotError::Raw(i64::from(raw)))?;
        Self::new(raw)
    }
}

impl From<ActivitySlot> for u16 {
    fn from(slot: ActivitySlot) -> Self {
        slot.0
    }
}

impl From<ActivitySlot> for i32 {
    fn from(slot: ActivitySlot) -> Self {
        i32::from(slot.0)
    }
}
