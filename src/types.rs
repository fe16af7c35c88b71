use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::time_format::format_clock;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidLocation {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// How Isha is derived: a depression angle below the horizon, or a fixed
/// delay after Maghrib.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IshaRule {
    Angle(f64),
    MinutesAfterMaghrib(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationMethod {
    pub name: &'static str,
    pub fajr_angle: f64,
    pub isha: IshaRule,
}

impl CalculationMethod {
    pub const ISNA: Self = Self {
        name: "ISNA",
        fajr_angle: 15.0,
        isha: IshaRule::Angle(15.0),
    };

    pub const MWL: Self = Self {
        name: "MWL",
        fajr_angle: 18.0,
        isha: IshaRule::Angle(17.0),
    };

    pub const MECCA: Self = Self {
        name: "Mecca",
        fajr_angle: 18.5,
        isha: IshaRule::MinutesAfterMaghrib(90.0),
    };

    pub const BUILT_IN: [Self; 3] = [Self::ISNA, Self::MWL, Self::MECCA];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::BUILT_IN.into_iter().find(|m| m.name == name)
    }

    /// Looks up a built-in profile by name, falling back to ISNA.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::debug!("Unknown calculation method {:?}, using ISNA", name);
            Self::ISNA
        })
    }
}

impl Default for CalculationMethod {
    fn default() -> Self {
        Self::ISNA
    }
}

/// Asr shadow rule. The discriminant is the shadow-length factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AsrMadhab {
    #[default]
    Shafi = 1,
    Hanafi = 2,
}

impl AsrMadhab {
    pub fn shadow_factor(self) -> f64 {
        self as i32 as f64
    }

    pub fn from_config_value(value: i64) -> Self {
        match value {
            2 => AsrMadhab::Hanafi,
            _ => AsrMadhab::Shafi,
        }
    }

    pub fn config_value(self) -> i64 {
        self as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// The five prayers considered when looking for the next one; Sunrise is not a prayer.
    pub const OBLIGATORY: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeFormat {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl TimeFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeFormat::TwelveHour => "12h",
            TimeFormat::TwentyFourHour => "24h",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "12h" => Some(TimeFormat::TwelveHour),
            "24h" => Some(TimeFormat::TwentyFourHour),
            _ => None,
        }
    }
}

/// A wall-clock minute. Displays and parses as "HH:MM" (24-hour).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct PrayerTime {
    pub hour: u8,
    pub minute: u8,
}

impl PrayerTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(Error::InvalidTime(format!("{}:{}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    /// Normalizes into [0, 24) then truncates to whole minutes.
    pub fn from_decimal_hours(hours: f64) -> Self {
        let mut hours = hours.rem_euclid(24.0);
        if hours >= 24.0 {
            hours -= 24.0;
        }
        let h = hours as u8;
        let m = ((hours - h as f64) * 60.0) as u8;
        Self { hour: h, minute: m }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = h.parse::<u8>().map_err(|_| invalid())?;
        let minute = m.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }

    pub fn minutes_since_midnight(self) -> i32 {
        self.hour as i32 * 60 + self.minute as i32
    }

    pub fn format(self, time_format: TimeFormat) -> String {
        format_clock(self.hour as u32, self.minute as u32, None, time_format)
    }
}

impl fmt::Display for PrayerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for PrayerTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<PrayerTime> for String {
    fn from(t: PrayerTime) -> Self {
        t.to_string()
    }
}

impl TryFrom<String> for PrayerTime {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

/// One day's six times, stored in schedule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DailyPrayerSchedule {
    pub times: [PrayerTime; 6],
}

impl DailyPrayerSchedule {
    pub fn get(&self, prayer: Prayer) -> PrayerTime {
        self.times[prayer.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, PrayerTime)> + '_ {
        Prayer::ALL.into_iter().zip(self.times.iter().copied())
    }
}

impl Index<Prayer> for DailyPrayerSchedule {
    type Output = PrayerTime;

    fn index(&self, prayer: Prayer) -> &PrayerTime {
        &self.times[prayer.index()]
    }
}

impl Serialize for DailyPrayerSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.times.len()))?;
        for (prayer, time) in self.iter() {
            map.serialize_entry(prayer.name(), &time)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    pub declination: f64,
    /// Hours, wrapped into [-12, 12].
    pub equation_of_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimezoneContext {
    pub base_offset: i32,
    pub daylight_saving: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPrayer {
    pub prayer: Prayer,
    pub time: PrayerTime,
    /// Set when every prayer today has passed and this is today's Fajr time standing in for tomorrow's.
    pub tomorrow: bool,
}
