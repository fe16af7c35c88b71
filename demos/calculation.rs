use prayer_times::clock::{LocalDateTime, ManualClock};
use prayer_times::config::{ConfigStore, MemoryConfig};
use prayer_times::dst::format_timezone_display;
use prayer_times::prayer_times::PrayerTimes;
use prayer_times::time_format::{format_time_remaining, minutes_until};
use prayer_times::types::CalculationMethod;

fn main() -> prayer_times::Result<()> {
    let now = LocalDateTime::new(2025, 9, 3, 14, 15, 0);
    let config = MemoryConfig::new();
    let location = config.location();
    let time_format = config.time_format();

    println!("=== Prayer Times Calculation Example ===");
    println!(
        "Location: {} ({:.4}°N, {:.4}°W)",
        config.get_string("location_name", "Unknown"),
        location.latitude,
        -location.longitude
    );
    println!(
        "Date/Time: {}-{:02}-{:02} {:02}:{:02}",
        now.year, now.month, now.day, now.hour, now.minute
    );
    let (base, dst) = (config.base_timezone(), config.daylight_saving());
    println!(
        "Timezone: {}",
        format_timezone_display(base, dst, now.year, now.month, now.day)
    );
    println!();

    let mut calc = PrayerTimes::from_config(ManualClock::new(now), config);
    let schedule = calc.update_prayer_times();

    for method in CalculationMethod::BUILT_IN {
        calc.set_method(method.name);
        let times = calc.update_prayer_times();
        println!("--- {} ---", method.name);
        for (prayer, time) in times.iter() {
            println!("{:8}: {}", prayer.name(), time.format(time_format));
        }
        println!();
    }

    let configured = calc.config().map(|c| c.method_name()).unwrap_or_default();
    calc.set_method(&configured);
    let next = calc.get_next_prayer();
    println!("--- Next Prayer ---");
    println!(
        "{} at {} (in {})",
        next.prayer,
        next.time.format(time_format),
        format_time_remaining(minutes_until(now.time_of_day()?, next.time))
    );
    println!("Recomputations: {}", calc.recomputation_count());
    println!("Schedule JSON: {}", serde_json::to_string(&schedule)?);
    Ok(())
}
