use std::cell::Cell;
use std::rc::Rc;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{Error, Result};
use crate::types::PrayerTime;

/// A local civil time reading, as supplied by the device RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl LocalDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub fn date(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }

    pub fn minutes_since_midnight(&self) -> i32 {
        (self.hour * 60 + self.minute) as i32
    }

    /// The wall-clock minute, rejecting readings outside 00:00..=23:59.
    pub fn time_of_day(&self) -> Result<PrayerTime> {
        let invalid = || Error::InvalidTime(format!("{}:{}", self.hour, self.minute));
        let hour = u8::try_from(self.hour).map_err(|_| invalid())?;
        let minute = u8::try_from(self.minute).map_err(|_| invalid())?;
        PrayerTime::new(hour, minute)
    }

    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }
}

impl From<NaiveDateTime> for LocalDateTime {
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }
}

pub trait Clock {
    fn now(&self) -> LocalDateTime;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> LocalDateTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> LocalDateTime {
        (**self).now()
    }
}

/// Reads the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> LocalDateTime {
        Local::now().naive_local().into()
    }
}

/// A settable clock, for driving the calculator deterministically.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<LocalDateTime>,
}

impl ManualClock {
    pub fn new(now: LocalDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: LocalDateTime) {
        self.now.set(now);
    }

    /// Moves the clock forward, rolling over into following days. Invalid
    /// readings are left untouched.
    pub fn advance_seconds(&self, seconds: i64) {
        if let Some(dt) = self.now.get().to_naive() {
            self.now.set((dt + Duration::seconds(seconds)).into());
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> LocalDateTime {
        self.now.get()
    }
}
