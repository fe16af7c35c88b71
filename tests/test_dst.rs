use chrono::{Datelike, NaiveDate, Offset, TimeZone};
use chrono_tz::America::New_York;

use prayer_times::dst::*;
use prayer_times::types::TimezoneContext;

// ── Weekday ──

#[test]
fn test_weekday_known_dates() {
    assert_eq!(weekday(2025, 9, 3), 3); // Wednesday
    assert_eq!(weekday(2000, 1, 1), 6); // Saturday
    assert_eq!(weekday(2024, 2, 29), 4); // Thursday
    assert_eq!(weekday(2025, 3, 9), 0); // Sunday
}

#[test]
fn test_weekday_matches_chrono() {
    let mut date = NaiveDate::from_ymd_opt(1901, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
    while date <= end {
        assert_eq!(
            weekday(date.year(), date.month(), date.day()),
            date.weekday().num_days_from_sunday(),
            "{}",
            date
        );
        date = date.succ_opt().unwrap();
    }
}

// ── Sunday rules ──

#[test]
fn test_second_sunday_of_march() {
    assert_eq!(second_sunday_of_march(2024), 10);
    assert_eq!(second_sunday_of_march(2025), 9);
    assert_eq!(second_sunday_of_march(2026), 8);
    assert_eq!(second_sunday_of_march(2020), 8);
}

#[test]
fn test_first_sunday_of_november() {
    assert_eq!(first_sunday_of_november(2024), 3);
    assert_eq!(first_sunday_of_november(2025), 2);
    assert_eq!(first_sunday_of_november(2026), 1);
}

#[test]
fn test_nth_sunday() {
    assert_eq!(nth_sunday(2025, 3, 1), 2);
    assert_eq!(nth_sunday(2025, 3, 4), 23);
    assert_eq!(nth_sunday(2025, 3, 0), nth_sunday(2025, 3, 1));
}

// ── DST activity ──

#[test]
fn test_dst_boundaries_2025() {
    assert!(!is_dst_active(2025, 3, 8));
    assert!(is_dst_active(2025, 3, 9));
    assert!(is_dst_active(2025, 11, 1));
    assert!(!is_dst_active(2025, 11, 2));
}

#[test]
fn test_dst_outside_and_inside_season() {
    for month in [1, 2, 12] {
        assert!(!is_dst_active(2025, month, 15), "month {}", month);
    }
    for month in 4..=10 {
        assert!(is_dst_active(2025, month, 1), "month {}", month);
    }
}

#[test]
fn test_dst_matches_new_york_at_noon() {
    for year in 2015..=2035 {
        let mut date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        while date.year() == year {
            let noon = New_York
                .with_ymd_and_hms(year, date.month(), date.day(), 12, 0, 0)
                .single()
                .unwrap();
            let edt = noon.offset().fix().local_minus_utc() == -4 * 3600;
            assert_eq!(is_dst_active(year, date.month(), date.day()), edt, "{}", date);
            date = date.succ_opt().unwrap();
        }
    }
}

// ── Offsets ──

#[test]
fn test_current_timezone_offset() {
    assert_eq!(current_timezone_offset(-5, true, 2025, 7, 4), -4);
    assert_eq!(current_timezone_offset(-5, false, 2025, 7, 4), -5);
    assert_eq!(current_timezone_offset(-5, true, 2025, 1, 15), -5);
}

#[test]
fn test_timezone_context() {
    let tz = TimezoneContext::new(-8, true);
    assert!(tz.is_dst(2025, 6, 1));
    assert_eq!(tz.current_offset(2025, 6, 1), -7);
    assert_eq!(tz.current_offset(2025, 12, 1), -8);

    let no_dst = TimezoneContext::new(-10, false);
    assert!(!no_dst.is_dst(2025, 6, 1));
    assert_eq!(no_dst.current_offset(2025, 6, 1), -10);
}

#[test]
fn test_format_timezone_display() {
    assert_eq!(format_timezone_display(-5, true, 2025, 7, 4), "UTC-4 (DST)");
    assert_eq!(format_timezone_display(-5, true, 2025, 1, 4), "UTC-5 (STD)");
    assert_eq!(format_timezone_display(-5, false, 2025, 7, 4), "UTC-5");
    assert_eq!(format_timezone_display(0, false, 2025, 7, 4), "UTC+0");
    assert_eq!(format_timezone_display(3, true, 2025, 1, 4), "UTC+3 (STD)");
}

#[test]
fn test_us_timezone_lookup() {
    assert_eq!(us_timezone_offset("Eastern"), Some(-5));
    assert_eq!(us_timezone_offset("pacific"), Some(-8));
    assert_eq!(us_timezone_offset("Hawaii"), Some(-10));
    assert_eq!(us_timezone_offset("Atlantic"), None);
    assert_eq!(US_TIMEZONES.len(), 6);
}
