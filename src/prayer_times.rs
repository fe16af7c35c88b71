//! The prayer-time calculator: solar geometry for one location, a cached
//! schedule for the current day, and queries against that schedule.

use chrono::NaiveDate;
use serde_json::json;

use crate::angles;
use crate::clock::Clock;
use crate::config::{ConfigStore, MemoryConfig, KEY_DAYLIGHT_SAVING};
use crate::error::{Error, Result};
use crate::types::{
    AsrMadhab, CalculationMethod, DailyPrayerSchedule, IshaRule, Location, NextPrayer, Prayer,
    PrayerTime, TimezoneContext,
};

/// Minutes added to sunset for Maghrib.
pub const MAGHRIB_MARGIN_MINUTES: f64 = 3.0;

/// What identifies "the same day" for the cached schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CacheKeyPolicy {
    /// Full calendar date.
    #[default]
    FullDate,
    /// Day of month only, as the device firmware does. The 5th of one month
    /// is indistinguishable from the 5th of the next.
    DayOfMonth,
}

impl CacheKeyPolicy {
    fn key(self, year: i32, month: u32, day: u32) -> (i32, u32, u32) {
        match self {
            CacheKeyPolicy::FullDate => (year, month, day),
            CacheKeyPolicy::DayOfMonth => (0, 0, day),
        }
    }
}

pub struct PrayerTimes<C, S = MemoryConfig> {
    location: Location,
    method: CalculationMethod,
    asr_madhab: AsrMadhab,
    timezone: TimezoneContext,
    current_offset: i32,
    clock: C,
    config: Option<S>,
    cache: Option<DailyPrayerSchedule>,
    cached_key: Option<(i32, u32, u32)>,
    cache_policy: CacheKeyPolicy,
    recomputations: u64,
}

impl<C: Clock> PrayerTimes<C, MemoryConfig> {
    /// A calculator without a settings store. Daylight saving stays off
    /// unless enabled with [`PrayerTimes::with_daylight_saving`].
    pub fn new(latitude: f64, longitude: f64, timezone: i32, method: &str, clock: C) -> Self {
        Self::build(latitude, longitude, timezone, method, clock, None)
    }
}

impl<C: Clock, S: ConfigStore> PrayerTimes<C, S> {
    fn build(
        latitude: f64,
        longitude: f64,
        timezone: i32,
        method: &str,
        clock: C,
        config: Option<S>,
    ) -> Self {
        let daylight_saving = config.as_ref().is_some_and(|c| c.daylight_saving());
        let asr_madhab = config.as_ref().map(|c| c.asr_madhab()).unwrap_or_default();
        Self {
            location: Location {
                latitude,
                longitude,
            },
            method: CalculationMethod::resolve(method),
            asr_madhab,
            timezone: TimezoneContext::new(timezone, daylight_saving),
            current_offset: timezone,
            clock,
            config,
            cache: None,
            cached_key: None,
            cache_policy: CacheKeyPolicy::default(),
            recomputations: 0,
        }
    }

    /// A calculator that consults `config` for the daylight-saving flag on every update.
    pub fn with_config(
        latitude: f64,
        longitude: f64,
        timezone: i32,
        method: &str,
        clock: C,
        config: S,
    ) -> Self {
        Self::build(latitude, longitude, timezone, method, clock, Some(config))
    }

    /// Reads location, base timezone, method and madhab from the settings store.
    pub fn from_config(clock: C, config: S) -> Self {
        let location = config.location();
        let timezone = config.base_timezone();
        let method = config.method_name();
        Self::build(
            location.latitude,
            location.longitude,
            timezone,
            &method,
            clock,
            Some(config),
        )
    }

    pub fn with_cache_policy(mut self, policy: CacheKeyPolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    pub fn with_daylight_saving(mut self, enabled: bool) -> Self {
        self.timezone.daylight_saving = enabled;
        self
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    pub fn asr_madhab(&self) -> AsrMadhab {
        self.asr_madhab
    }

    pub fn timezone(&self) -> TimezoneContext {
        self.timezone
    }

    /// UTC offset applied by the last or next recomputation.
    pub fn current_offset(&self) -> i32 {
        self.current_offset
    }

    pub fn cache_policy(&self) -> CacheKeyPolicy {
        self.cache_policy
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> Option<&S> {
        self.config.as_ref()
    }

    pub fn config_mut(&mut self) -> Option<&mut S> {
        self.config.as_mut()
    }

    pub fn cached_schedule(&self) -> Option<DailyPrayerSchedule> {
        self.cache
    }

    /// True when the next update recomputes regardless of the date.
    pub fn is_invalidated(&self) -> bool {
        self.cached_key.is_none()
    }

    pub fn recomputation_count(&self) -> u64 {
        self.recomputations
    }

    pub fn calculate_times(&self, year: i32, month: u32, day: u32) -> DailyPrayerSchedule {
        let latitude = self.location.latitude;
        let jd = angles::gregorian_to_julian(year, month, day);
        let sun = angles::sun_position(angles::julian_century(jd));
        let decl = sun.declination;
        let transit = angles::solar_transit(sun.equation_of_time);

        let sunrise =
            angles::horizon_time(transit, angles::SUNRISE_ALTITUDE, decl, latitude, false);
        let sunset = angles::horizon_time(transit, angles::SUNRISE_ALTITUDE, decl, latitude, true);
        let fajr = angles::horizon_time(transit, -self.method.fajr_angle, decl, latitude, false);

        let asr_angle = angles::asr_altitude(self.asr_madhab.shadow_factor(), latitude, decl);
        let asr = angles::horizon_time(transit, asr_angle, decl, latitude, true);

        let maghrib = sunset + MAGHRIB_MARGIN_MINUTES / 60.0;
        let isha = match self.method.isha {
            IshaRule::MinutesAfterMaghrib(minutes) => maghrib + minutes / 60.0,
            IshaRule::Angle(angle) => angles::horizon_time(transit, -angle, decl, latitude, true),
        };

        let times = [fajr, sunrise, transit, asr, maghrib, isha].map(|hours| {
            PrayerTime::from_decimal_hours(angles::to_clock_hours(
                hours,
                self.location.longitude,
                self.current_offset,
            ))
        });
        DailyPrayerSchedule { times }
    }

    /// [`PrayerTimes::calculate_times`] for dates that have not been validated upstream.
    pub fn try_calculate_times(
        &self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<DailyPrayerSchedule> {
        NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::InvalidDate { year, month, day })?;
        Ok(self.calculate_times(year, month, day))
    }

    fn refresh_timezone(&mut self, year: i32, month: u32, day: u32) {
        if let Some(config) = &self.config {
            self.timezone.daylight_saving = config.daylight_saving();
        }
        self.current_offset = self.timezone.current_offset(year, month, day);
        log::debug!(
            "Timezone for {}-{:02}-{:02}: UTC{:+}",
            year,
            month,
            day,
            self.current_offset
        );
    }

    /// Returns today's schedule, recomputing only when the day changed or the
    /// cache was invalidated. The timezone offset is re-derived on every call.
    pub fn update_prayer_times(&mut self) -> DailyPrayerSchedule {
        let now = self.clock.now();
        let (year, month, day) = now.date();
        self.refresh_timezone(year, month, day);

        let key = self.cache_policy.key(year, month, day);
        match self.cache {
            Some(schedule) if self.cached_key == Some(key) => schedule,
            _ => {
                log::info!(
                    "Calculating prayer times for {}-{:02}-{:02} using UTC{:+}",
                    year,
                    month,
                    day,
                    self.current_offset
                );
                let schedule = self.calculate_times(year, month, day);
                self.cache = Some(schedule);
                self.cached_key = Some(key);
                self.recomputations += 1;
                schedule
            }
        }
    }

    /// The cached schedule, computed first if there is none or it was invalidated.
    pub fn get_prayer_times(&mut self) -> DailyPrayerSchedule {
        match self.cache {
            Some(schedule) if !self.is_invalidated() => schedule,
            _ => self.update_prayer_times(),
        }
    }

    /// The first of the five prayers later than the current minute, or
    /// today's Fajr time flagged as tomorrow once Isha has passed.
    pub fn get_next_prayer(&mut self) -> NextPrayer {
        let schedule = self.get_prayer_times();
        let current = self.clock.now().minutes_since_midnight();

        Prayer::OBLIGATORY
            .into_iter()
            .map(|prayer| (prayer, schedule.get(prayer)))
            .find(|(_, time)| time.minutes_since_midnight() > current)
            .map(|(prayer, time)| NextPrayer {
                prayer,
                time,
                tomorrow: false,
            })
            .unwrap_or(NextPrayer {
                prayer: Prayer::Fajr,
                time: schedule.get(Prayer::Fajr),
                tomorrow: true,
            })
    }

    /// The entry whose "HH:MM" equals the given minute exactly. A minute that
    /// is never polled never alerts.
    pub fn check_prayer_time_alert(&mut self, hour: u32, minute: u32) -> Option<Prayer> {
        let schedule = self.get_prayer_times();
        Prayer::ALL.into_iter().find(|&prayer| {
            let time = schedule.get(prayer);
            time.hour as u32 == hour && time.minute as u32 == minute
        })
    }

    /// Forces the next [`PrayerTimes::update_prayer_times`] to recompute.
    pub fn invalidate_cache(&mut self) {
        self.cached_key = None;
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
        self.invalidate_cache();
    }

    pub fn set_method(&mut self, method: &str) {
        self.method = CalculationMethod::resolve(method);
        self.invalidate_cache();
    }

    pub fn set_asr_madhab(&mut self, madhab: AsrMadhab) {
        self.asr_madhab = madhab;
        self.invalidate_cache();
    }

    pub fn set_base_timezone(&mut self, base_offset: i32) {
        self.timezone.base_offset = base_offset;
        self.invalidate_cache();
    }

    /// Toggles daylight saving, persisting the flag when a settings store is attached.
    pub fn set_daylight_saving(&mut self, enabled: bool) -> Result<()> {
        if let Some(config) = &mut self.config {
            config.set(KEY_DAYLIGHT_SAVING, json!(enabled))?;
        }
        self.timezone.daylight_saving = enabled;
        self.invalidate_cache();
        Ok(())
    }
}
