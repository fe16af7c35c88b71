pub mod angles;
pub mod clock;
pub mod config;
pub mod dst;
pub mod error;
pub mod monitor;
pub mod prayer_times;
pub mod time_format;
pub mod types;

pub use angles::{
    asr_altitude, deg_to_rad, equation_of_center, equation_of_time, gregorian_to_julian,
    horizon_time, hour_angle_for_altitude, julian_century, mean_anomaly, mean_longitude,
    normalize_angle, obliquity_of_ecliptic, rad_to_deg, right_ascension, solar_declination,
    solar_transit, sun_position, to_clock_hours, DEGREES_PER_HOUR, SUNRISE_ALTITUDE,
};

pub use clock::{Clock, LocalDateTime, ManualClock, SystemClock};

pub use config::{
    default_settings, find_city, City, ConfigStore, JsonConfig, MemoryConfig,
    CALCULATION_METHOD_NAMES, US_CITIES,
};

pub use dst::{
    current_timezone_offset, first_sunday_of_november, format_timezone_display, is_dst_active,
    second_sunday_of_march, weekday, US_TIMEZONES,
};

pub use error::{Error, Result};

pub use monitor::{MonitorEvent, PrayerMonitor};

pub use prayer_times::{CacheKeyPolicy, PrayerTimes};

pub use time_format::{format_clock, format_time_remaining, minutes_until};

pub use types::{
    AsrMadhab, CalculationMethod, DailyPrayerSchedule, IshaRule, Location, NextPrayer, Prayer,
    PrayerTime, SunPosition, TimeFormat, TimezoneContext,
};
