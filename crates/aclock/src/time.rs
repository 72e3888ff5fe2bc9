//! Wall-clock readings.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, Timelike};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Local time of day, as read from a wall clock.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
    second: u32,
    nanos: u32,
}

impl ClockTime {
    /// Builds a time of day; `None` when a field is out of range.
    pub fn new(hour: u32, minute: u32, second: u32) -> Option<Self> {
        (hour < 24 && minute < 60 && second < 60).then_some(Self {
            hour,
            minute,
            second,
            nanos: 0,
        })
    }

    /// Adds a sub-second part, saturating just below the next second.
    pub fn with_nanos(mut self, nanos: u32) -> Self {
        self.nanos = nanos.min(NANOS_PER_SEC - 1);
        self
    }

    /// Reads the fields of any chrono time.
    ///
    /// chrono reports a leap second as `nanosecond() >= 1e9`; it is folded
    /// into the last instant of second 59 so angles never overshoot the minute.
    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second().min(59),
            nanos: t.nanosecond().min(NANOS_PER_SEC - 1),
        }
    }

    pub fn hour(self) -> u32 {
        self.hour
    }

    pub fn minute(self) -> u32 {
        self.minute
    }

    pub fn second(self) -> u32 {
        self.second
    }

    pub fn nanos(self) -> u32 {
        self.nanos
    }

    /// Seconds into the current minute, including the sub-second part.
    pub fn seconds_f64(self) -> f64 {
        self.second as f64 + self.nanos as f64 / NANOS_PER_SEC as f64
    }

    /// `(hour, minute)` shifted forward by `minutes`, wrapping at midnight.
    pub fn plus_minutes(self, minutes: u32) -> Self {
        const MINUTES_PER_DAY: u32 = 24 * 60;
        let total = (self.hour * 60 + self.minute + minutes % MINUTES_PER_DAY) % MINUTES_PER_DAY;
        Self {
            hour: total / 60,
            minute: total % 60,
            ..self
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Error returned when parsing `HH:MM[:SS]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseClockTimeError(pub String);

impl fmt::Display for ParseClockTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time of day: {}", self.0)
    }
}

impl std::error::Error for ParseClockTimeError {}

impl FromStr for ClockTime {
    type Err = ParseClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |why: &str| ParseClockTimeError(format!("'{s}' ({why})"));

        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(err("expected HH:MM or HH:MM:SS"));
        }

        let mut fields = [0u32; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| err("not a number"))?;
        }

        ClockTime::new(fields[0], fields[1], fields[2]).ok_or_else(|| err("field out of range"))
    }
}

/// Source of the current time of day.
pub trait WallClock {
    fn now(&self) -> ClockTime;
}

/// The operating system's local time.
#[derive(Debug, Copy, Clone, Default)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn now(&self) -> ClockTime {
        ClockTime::from_timelike(&Local::now())
    }
}

/// A clock stopped at one reading.
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(pub ClockTime);

impl WallClock for FixedClock {
    fn now(&self) -> ClockTime {
        self.0
    }
}
