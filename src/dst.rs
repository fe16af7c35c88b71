//! United States daylight-saving rule and the timezone offset derived from it.
//!
//! DST runs from the second Sunday of March to the first Sunday of November.
//! Resolution is by calendar day; the 02:00 switch-over hour is not modelled.

use crate::types::TimezoneContext;

pub const US_TIMEZONES: [(&str, i32); 6] = [
    ("Eastern", -5),
    ("Central", -6),
    ("Mountain", -7),
    ("Pacific", -8),
    ("Alaska", -9),
    ("Hawaii", -10),
];

/// Day of the week by Zeller's congruence, 0 = Sunday .. 6 = Saturday.
pub fn weekday(year: i32, month: u32, day: u32) -> u32 {
    let (y, m) = if month < 3 {
        (year - 1, month as i32 + 12)
    } else {
        (year, month as i32)
    };
    let k = y.rem_euclid(100);
    let j = y.div_euclid(100);
    // Zeller's h counts from Saturday.
    let h = (day as i32 + (13 * (m + 1)).div_euclid(5) + k + k.div_euclid(4) + j.div_euclid(4)
        - 2 * j)
        .rem_euclid(7);
    ((h + 6) % 7) as u32
}

/// Day of month of the `n`th Sunday. `n = 0` is treated as the first.
pub fn nth_sunday(year: i32, month: u32, n: u32) -> u32 {
    let first_weekday = weekday(year, month, 1);
    1 + (7 - first_weekday) % 7 + 7 * n.saturating_sub(1)
}

pub fn second_sunday_of_march(year: i32) -> u32 {
    nth_sunday(year, 3, 2)
}

pub fn first_sunday_of_november(year: i32) -> u32 {
    nth_sunday(year, 11, 1)
}

pub fn is_dst_active(year: i32, month: u32, day: u32) -> bool {
    match month {
        3 => day >= second_sunday_of_march(year),
        4..=10 => true,
        11 => day < first_sunday_of_november(year),
        _ => false,
    }
}

pub fn current_timezone_offset(
    base_offset: i32,
    daylight_saving_enabled: bool,
    year: i32,
    month: u32,
    day: u32,
) -> i32 {
    if daylight_saving_enabled && is_dst_active(year, month, day) {
        base_offset + 1
    } else {
        base_offset
    }
}

/// Renders the offset in effect on the given day, e.g. "UTC-4 (DST)".
pub fn format_timezone_display(
    base_offset: i32,
    daylight_saving_enabled: bool,
    year: i32,
    month: u32,
    day: u32,
) -> String {
    let offset = current_timezone_offset(base_offset, daylight_saving_enabled, year, month, day);
    let status = match (daylight_saving_enabled, is_dst_active(year, month, day)) {
        (false, _) => "",
        (true, true) => " (DST)",
        (true, false) => " (STD)",
    };
    format!("UTC{:+}{}", offset, status)
}

pub fn us_timezone_offset(zone: &str) -> Option<i32> {
    US_TIMEZONES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(zone))
        .map(|&(_, offset)| offset)
}

impl TimezoneContext {
    pub fn new(base_offset: i32, daylight_saving: bool) -> Self {
        Self {
            base_offset,
            daylight_saving,
        }
    }

    pub fn is_dst(&self, year: i32, month: u32, day: u32) -> bool {
        self.daylight_saving && is_dst_active(year, month, day)
    }

    pub fn current_offset(&self, year: i32, month: u32, day: u32) -> i32 {
        current_timezone_offset(self.base_offset, self.daylight_saving, year, month, day)
    }
}
