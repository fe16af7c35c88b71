//! Persistent key-value settings.
//!
//! Values are kept as untyped JSON so keys this crate does not know about
//! survive a load/save cycle unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::types::{AsrMadhab, Location, TimeFormat};

pub const KEY_LOCATION_NAME: &str = "location_name";
pub const KEY_LATITUDE: &str = "latitude";
pub const KEY_LONGITUDE: &str = "longitude";
pub const KEY_TIMEZONE: &str = "timezone";
pub const KEY_DAYLIGHT_SAVING: &str = "daylight_saving";
pub const KEY_METHOD: &str = "method";
pub const KEY_ASR_MADHAB: &str = "asr_madhab";
pub const KEY_TIME_FORMAT: &str = "time_format";
pub const KEY_SELECTED_CITY: &str = "selected_city";
pub const KEY_BUZZER_ENABLED: &str = "buzzer_enabled";
pub const KEY_BUZZER_DURATION: &str = "buzzer_duration";

pub const DEFAULT_LOCATION_NAME: &str = "Tampa";
pub const DEFAULT_LATITUDE: f64 = 27.9506;
pub const DEFAULT_LONGITUDE: f64 = -82.4572;
pub const DEFAULT_TIMEZONE: i32 = -5;
pub const DEFAULT_METHOD: &str = "ISNA";

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: i32,
}

const fn city(name: &'static str, latitude: f64, longitude: f64, timezone: i32) -> City {
    City {
        name,
        latitude,
        longitude,
        timezone,
    }
}

pub const US_CITIES: [City; 25] = [
    city("New York", 40.7128, -74.0060, -5),
    city("Los Angeles", 34.0522, -118.2437, -8),
    city("Chicago", 41.8781, -87.6298, -6),
    city("Houston", 29.7604, -95.3698, -6),
    city("Phoenix", 33.4484, -112.0740, -7),
    city("Philadelphia", 39.9526, -75.1652, -5),
    city("San Antonio", 29.4241, -98.4936, -6),
    city("San Diego", 32.7157, -117.1611, -8),
    city("Dallas", 32.7767, -96.7970, -6),
    city("Detroit", 42.3314, -83.0458, -5),
    city("Miami", 25.7617, -80.1918, -5),
    city("Boston", 42.3601, -71.0589, -5),
    city("Seattle", 47.6062, -122.3321, -8),
    city("Denver", 39.7392, -104.9903, -7),
    city("Washington DC", 38.9072, -77.0369, -5),
    city("Atlanta", 33.7490, -84.3880, -5),
    city("Las Vegas", 36.1699, -115.1398, -8),
    city("San Francisco", 37.7749, -122.4194, -8),
    city("Portland", 45.5152, -122.6784, -8),
    city("Minneapolis", 44.9778, -93.2650, -6),
    city("Salt Lake City", 40.7608, -111.8910, -7),
    city("Kansas City", 39.0997, -94.5786, -6),
    city("St. Louis", 38.6270, -90.1994, -6),
    city("Orlando", 28.5383, -81.3792, -5),
    city("Tampa", 27.9506, -82.4572, -5),
];

/// Method codes offered in settings. Codes without a built-in profile resolve to ISNA.
pub const CALCULATION_METHOD_NAMES: [(&str, &str); 7] = [
    ("MWL", "Muslim World League"),
    ("ISNA", "Islamic Society of North America"),
    ("Egypt", "Egyptian General Authority"),
    ("Mecca", "Umm Al-Qura, Mecca"),
    ("Karachi", "University of Karachi"),
    ("Tehran", "Institute of Tehran"),
    ("Jafari", "Shia Ithna-Ashari"),
];

pub fn find_city(name: &str) -> Option<&'static City> {
    US_CITIES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

pub fn default_settings() -> Map<String, Value> {
    let defaults = json!({
        KEY_LOCATION_NAME: DEFAULT_LOCATION_NAME,
        KEY_LATITUDE: DEFAULT_LATITUDE,
        KEY_LONGITUDE: DEFAULT_LONGITUDE,
        KEY_TIMEZONE: DEFAULT_TIMEZONE,
        KEY_DAYLIGHT_SAVING: true,
        KEY_METHOD: DEFAULT_METHOD,
        KEY_ASR_MADHAB: 1,
        KEY_TIME_FORMAT: "12h",
        KEY_SELECTED_CITY: DEFAULT_LOCATION_NAME,
        KEY_BUZZER_ENABLED: true,
        KEY_BUZZER_DURATION: 5,
    });
    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Applies several keys as one update. Stores that persist may override
    /// this to write once.
    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(|v| v.as_f64()).unwrap_or(default)
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .unwrap_or(default)
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    }

    fn location(&self) -> Location {
        Location {
            latitude: self.get_f64(KEY_LATITUDE, DEFAULT_LATITUDE),
            longitude: self.get_f64(KEY_LONGITUDE, DEFAULT_LONGITUDE),
        }
    }

    fn base_timezone(&self) -> i32 {
        self.get_i64(KEY_TIMEZONE, DEFAULT_TIMEZONE as i64) as i32
    }

    fn daylight_saving(&self) -> bool {
        self.get_bool(KEY_DAYLIGHT_SAVING, true)
    }

    fn method_name(&self) -> String {
        self.get_string(KEY_METHOD, DEFAULT_METHOD)
    }

    fn asr_madhab(&self) -> AsrMadhab {
        AsrMadhab::from_config_value(self.get_i64(KEY_ASR_MADHAB, 1))
    }

    fn time_format(&self) -> TimeFormat {
        TimeFormat::parse(&self.get_string(KEY_TIME_FORMAT, "12h")).unwrap_or_default()
    }

    fn update_location(&mut self, city: &City) -> Result<()> {
        self.set_many(vec![
            (KEY_LOCATION_NAME, json!(city.name)),
            (KEY_LATITUDE, json!(city.latitude)),
            (KEY_LONGITUDE, json!(city.longitude)),
            (KEY_TIMEZONE, json!(city.timezone)),
            (KEY_SELECTED_CITY, json!(city.name)),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryConfig {
    settings: Map<String, Value>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self {
            settings: default_settings(),
        }
    }

    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for MemoryConfig {
    fn get(&self, key: &str) -> Option<Value> {
        self.settings.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.settings.insert(key.to_string(), value);
        Ok(())
    }
}

/// Settings backed by a JSON file; every change is written through.
#[derive(Debug, Clone)]
pub struct JsonConfig {
    path: PathBuf,
    settings: Map<String, Value>,
}

impl JsonConfig {
    /// Loads saved settings over the defaults. A missing or unreadable file
    /// leaves the defaults in place and rewrites the file with them.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut settings = default_settings();
        match read_settings(&path) {
            Ok(saved) => {
                log::info!("Loaded {} settings from {}", saved.len(), path.display());
                settings.extend(saved);
                return Self { path, settings };
            }
            Err(e) => {
                log::warn!("Using default settings, {} unusable: {}", path.display(), e);
            }
        }
        let config = Self { path, settings };
        if let Err(e) = config.save() {
            log::warn!("Error saving settings: {}", e);
        }
        config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    pub fn save(&self) -> Result<()> {
        let text = serde_json::to_string(&self.settings)?;
        fs::write(&self.path, text)?;
        log::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

fn read_settings(path: &Path) -> Result<Map<String, Value>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

impl ConfigStore for JsonConfig {
    fn get(&self, key: &str) -> Option<Value> {
        self.settings.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.settings.insert(key.to_string(), value);
        self.save()
    }

    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> Result<()> {
        for (key, value) in entries {
            self.settings.insert(key.to_string(), value);
        }
        self.save()
    }
}
