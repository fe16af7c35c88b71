use crate::types::{PrayerTime, TimeFormat};

pub const MINUTES_PER_DAY: i32 = 1440;

pub fn minutes_to_time(total_minutes: i32) -> (i32, i32) {
    (total_minutes / 60, total_minutes % 60)
}

pub fn time_to_minutes(time: (i32, i32)) -> i32 {
    time.0 * 60 + time.1
}

/// Minutes from `now` until `target`, wrapping past midnight.
pub fn minutes_until(now: PrayerTime, target: PrayerTime) -> i32 {
    let diff = target.minutes_since_midnight() - now.minutes_since_midnight();
    if diff < 0 {
        diff + MINUTES_PER_DAY
    } else {
        diff
    }
}

pub fn format_time_remaining(minutes: i32) -> String {
    let (hours, minutes) = minutes_to_time(minutes);
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Renders a clock reading in the user's format, optionally with seconds.
pub fn format_clock(
    hour: u32,
    minute: u32,
    second: Option<u32>,
    time_format: TimeFormat,
) -> String {
    match time_format {
        TimeFormat::TwelveHour => {
            let period = if hour < 12 { "AM" } else { "PM" };
            let hour = match hour {
                0 => 12,
                h if h > 12 => h - 12,
                h => h,
            };
            match second {
                Some(s) => format!("{}:{:02}:{:02} {}", hour, minute, s, period),
                None => format!("{}:{:02} {}", hour, minute, period),
            }
        }
        TimeFormat::TwentyFourHour => match second {
            Some(s) => format!("{:02}:{:02}:{:02}", hour, minute, s),
            None => format!("{:02}:{:02}", hour, minute),
        },
    }
}
