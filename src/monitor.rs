//! Poll-driven upkeep of a calculator, one clock reading per tick.
//!
//! The monitor owns the calculator outright, so the cached schedule only ever
//! has one writer.

use crate::clock::{Clock, LocalDateTime};
use crate::config::{ConfigStore, MemoryConfig};
use crate::prayer_times::PrayerTimes;
use crate::types::{DailyPrayerSchedule, Prayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    ScheduleRefreshed(DailyPrayerSchedule),
    MinuteChanged(LocalDateTime),
    PrayerAlert(Prayer),
}

pub struct PrayerMonitor<C, S = MemoryConfig> {
    calculator: PrayerTimes<C, S>,
    last_date: Option<(i32, u32, u32)>,
    last_minute: Option<(u32, u32)>,
}

impl<C: Clock, S: ConfigStore> PrayerMonitor<C, S> {
    pub fn new(calculator: PrayerTimes<C, S>) -> Self {
        Self {
            calculator,
            last_date: None,
            last_minute: None,
        }
    }

    pub fn calculator(&self) -> &PrayerTimes<C, S> {
        &self.calculator
    }

    pub fn calculator_mut(&mut self) -> &mut PrayerTimes<C, S> {
        &mut self.calculator
    }

    pub fn into_inner(self) -> PrayerTimes<C, S> {
        self.calculator
    }

    /// Runs one loop iteration: refresh on a new date or after the cache was
    /// invalidated, then check the minute for an alert. Each minute is
    /// checked at most once.
    pub fn tick(&mut self) -> Vec<MonitorEvent> {
        let now = self.calculator.clock().now();
        let mut events = Vec::new();

        if self.last_date != Some(now.date()) || self.calculator.is_invalidated() {
            let before = self.calculator.recomputation_count();
            let schedule = self.calculator.update_prayer_times();
            if self.calculator.recomputation_count() != before {
                events.push(MonitorEvent::ScheduleRefreshed(schedule));
            }
            self.last_date = Some(now.date());
        }

        let minute = (now.hour, now.minute);
        if self.last_minute != Some(minute) {
            self.last_minute = Some(minute);
            events.push(MonitorEvent::MinuteChanged(now));

            if let Some(prayer) = self.calculator.check_prayer_time_alert(now.hour, now.minute) {
                log::info!("Prayer alert: it's time for {}", prayer);
                events.push(MonitorEvent::PrayerAlert(prayer));
            }
        }

        events
    }
}
