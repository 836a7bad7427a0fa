//! # Clock
//!
//! The time source for date-sensitive rules.
//!
//! The engine reads the clock once per `calculate` call and hands the same
//! moment to every rule, so a single calculation never straddles midnight.
//! Weekdays are judged in the clock's own UTC offset: a store in UTC+3 is
//! already on Friday while UTC is still on Thursday evening.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use std::fmt;

/// Supplies the current moment.
///
/// Implementations must be cheap and free of mutable state so that one
/// instance can be shared by every request.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock, at a fixed UTC offset or at the host's local offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// Uses whatever offset the host reports at the moment of each read.
    pub fn local() -> Self {
        SystemClock { offset: None }
    }

    /// Uses a fixed offset regardless of host settings.
    pub fn with_offset(offset: FixedOffset) -> Self {
        SystemClock {
            offset: Some(offset),
        }
    }

    /// Like `with_offset`, from minutes east of UTC. `None` if out of range.
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::with_offset)
    }

    /// The configured offset, if any.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset),
            None => {
                let now = Local::now();
                now.with_timezone(now.offset())
            }
        }
    }
}

/// A clock stuck at one moment. For tests and for replaying a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    at: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        FixedClock { at }
    }

    pub fn at_utc(at: DateTime<Utc>) -> Self {
        FixedClock {
            at: at.with_timezone(&at.offset().fix()),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.at
    }
}
