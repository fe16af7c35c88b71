use crate::types::SunPosition;

pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const J2000: f64 = 2451545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;
/// Apparent altitude of the sun's upper limb at sunrise and sunset (refraction plus semi-diameter).
pub const SUNRISE_ALTITUDE: f64 = -0.833;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

pub fn is_gregorian(year: i32, month: u32, day: u32) -> bool {
    (year, month, day) >= (1582, 10, 15)
}

pub fn gregorian_to_julian(year: i32, month: u32, day: u32) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let b = if is_gregorian(year, month, day) {
        let a = (y as f64 / 100.0).floor();
        2.0 - a + (a / 4.0).floor()
    } else {
        0.0
    };
    (365.25 * (y + 4716) as f64).floor() + (30.6001 * (m + 1) as f64).floor() + day as f64 + b
        - 1524.5
}

pub fn julian_century(julian_day: f64) -> f64 {
    (julian_day - J2000) / DAYS_PER_JULIAN_CENTURY
}

pub fn mean_longitude(t: f64) -> f64 {
    normalize_angle(280.46646 + 36000.76983 * t + 0.0003032 * t * t)
}

pub fn mean_anomaly(t: f64) -> f64 {
    normalize_angle(357.52911 + 35999.05029 * t - 0.0001537 * t * t)
}

pub fn equation_of_center(mean_anomaly: f64, t: f64) -> f64 {
    let m = mean_anomaly;
    (1.914602 - 0.004817 * t - 0.000014 * t * t) * deg_to_rad(m).sin()
        + (0.019993 - 0.000101 * t) * deg_to_rad(2.0 * m).sin()
        + 0.000289 * deg_to_rad(3.0 * m).sin()
}

pub fn obliquity_of_ecliptic(t: f64) -> f64 {
    23.439 - 0.00000036 * t
}

pub fn solar_declination(obliquity: f64, true_longitude: f64) -> f64 {
    rad_to_deg((deg_to_rad(obliquity).sin() * deg_to_rad(true_longitude).sin()).asin())
}

pub fn right_ascension(obliquity: f64, true_longitude: f64) -> f64 {
    let l = deg_to_rad(true_longitude);
    let ra = rad_to_deg((deg_to_rad(obliquity).cos() * l.sin()).atan2(l.cos()));
    // Shift before reducing so positive angles go through the same rounding as negative ones.
    (ra + 360.0) % 360.0
}

/// Equation of time in hours, wrapped into [-12, 12].
pub fn equation_of_time(mean_longitude: f64, right_ascension: f64) -> f64 {
    let eot = (mean_longitude - right_ascension) / DEGREES_PER_HOUR;
    if eot > 12.0 {
        eot - 24.0
    } else if eot < -12.0 {
        eot + 24.0
    } else {
        eot
    }
}

pub fn sun_position(t: f64) -> SunPosition {
    let l0 = mean_longitude(t);
    let m = mean_anomaly(t);
    let l = l0 + equation_of_center(m, t);
    let epsilon = obliquity_of_ecliptic(t);
    SunPosition {
        declination: solar_declination(epsilon, l),
        equation_of_time: equation_of_time(l0, right_ascension(epsilon, l)),
    }
}

pub fn solar_transit(equation_of_time: f64) -> f64 {
    12.0 - equation_of_time
}

/// Hours between transit and the moment the sun sits at `altitude` degrees.
///
/// The cosine is clamped, so latitudes where the sun never reaches the
/// altitude saturate at 0 or 12 hours instead of failing.
pub fn hour_angle_for_altitude(altitude: f64, declination: f64, latitude: f64) -> f64 {
    let dec_rad = deg_to_rad(declination);
    let lat_rad = deg_to_rad(latitude);
    let cos_h = (deg_to_rad(altitude).sin() - dec_rad.sin() * lat_rad.sin())
        / (dec_rad.cos() * lat_rad.cos());
    rad_to_deg(cos_h.clamp(-1.0, 1.0).acos()) / DEGREES_PER_HOUR
}

pub fn horizon_time(
    transit: f64,
    altitude: f64,
    declination: f64,
    latitude: f64,
    after_transit: bool,
) -> f64 {
    let ha = hour_angle_for_altitude(altitude, declination, latitude);
    if after_transit {
        transit + ha
    } else {
        transit - ha
    }
}

/// Sun altitude at which an object's shadow equals `shadow_factor` times its
/// height plus its noon shadow.
pub fn asr_altitude(shadow_factor: f64, latitude: f64, declination: f64) -> f64 {
    rad_to_deg((1.0 / (shadow_factor + deg_to_rad((latitude - declination).abs()).tan())).atan())
}

/// Shifts local apparent solar hours onto the civil clock of `utc_offset`.
pub fn to_clock_hours(solar_hours: f64, longitude: f64, utc_offset: i32) -> f64 {
    let longitude_correction = -longitude / DEGREES_PER_HOUR;
    solar_hours + longitude_correction + utc_offset as f64
}
