//! Timezone-aware rendering of backend timestamps.
//!
//! Formatting always goes through an explicit [`TimezoneContext`]. The app
//! resolves one at startup (saved preference, then the host zone, then UTC)
//! and hands it down the component tree.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{PrefsError, TimezoneError};
use crate::prefs::{KeyValueStore, TIMEZONE_KEY};

pub const INVALID_DATE: &str = "Invalid Date";
pub const INVALID_TIME: &str = "Invalid Time";

const DATE_FORMAT: &str = "%b %-d, %Y";
const TIME_FORMAT: &str = "%H:%M:%S";

pub const COMMON_TIMEZONES: &[(&str, &str)] = &[
    ("UTC", "UTC (Coordinated Universal Time)"),
    ("America/New_York", "Eastern Time (US)"),
    ("America/Chicago", "Central Time (US)"),
    ("America/Denver", "Mountain Time (US)"),
    ("America/Los_Angeles", "Pacific Time (US)"),
    ("Europe/London", "London (GMT/BST)"),
    ("Europe/Paris", "Paris (CET/CEST)"),
    ("Europe/Berlin", "Berlin (CET/CEST)"),
    ("Europe/Rome", "Rome (CET/CEST)"),
    ("Europe/Madrid", "Madrid (CET/CEST)"),
    ("Europe/Amsterdam", "Amsterdam (CET/CEST)"),
    ("Europe/Vienna", "Vienna (CET/CEST)"),
    ("Europe/Zurich", "Zurich (CET/CEST)"),
    ("Asia/Tokyo", "Tokyo (JST)"),
    ("Asia/Shanghai", "Shanghai (CST)"),
    ("Asia/Kolkata", "Mumbai/Delhi (IST)"),
    ("Australia/Sydney", "Sydney (AEST/AEDT)"),
    ("Australia/Melbourne", "Melbourne (AEST/AEDT)"),
    ("Pacific/Auckland", "Auckland (NZST/NZDT)"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayDateTime {
    pub date: String,
    pub time: String,
}

impl DisplayDateTime {
    pub fn invalid() -> Self {
        Self {
            date: INVALID_DATE.to_string(),
            time: INVALID_TIME.to_string(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.date != INVALID_DATE
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimezoneContext {
    tz: Tz,
}

impl Default for TimezoneContext {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimezoneContext {
    pub fn new(name: &str) -> Result<Self, TimezoneError> {
        Tz::from_str(name.trim())
            .map(|tz| Self { tz })
            .map_err(|_| TimezoneError(name.to_string()))
    }

    pub fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Resolve the startup zone: saved preference, else the host's, else UTC.
    pub fn resolve(store: &impl KeyValueStore, host: Option<String>) -> Self {
        if let Some(saved) = store.get(TIMEZONE_KEY) {
            match Self::new(&saved) {
                Ok(ctx) => {
                    tracing::debug!(timezone = ctx.name(), "using saved timezone");
                    return ctx;
                }
                Err(err) => tracing::warn!(error = %err, "ignoring saved timezone"),
            }
        }
        match host.as_deref().map(Self::new) {
            Some(Ok(ctx)) => {
                tracing::debug!(timezone = ctx.name(), "using system timezone");
                ctx
            }
            _ => Self::utc(),
        }
    }

    pub fn persist(&self, store: &impl KeyValueStore) -> Result<(), PrefsError> {
        store.set(TIMEZONE_KEY, self.name())
    }

    /// Split a backend timestamp into display date and time in this zone.
    /// Never fails: unreadable input renders as "Invalid Date"/"Invalid Time".
    pub fn format(&self, timestamp: &str) -> DisplayDateTime {
        match parse_backend_timestamp(timestamp) {
            Some(Parsed::Instant(instant)) => {
                let local = instant.with_timezone(&self.tz);
                DisplayDateTime {
                    date: local.format(DATE_FORMAT).to_string(),
                    time: local.format(TIME_FORMAT).to_string(),
                }
            }
            Some(Parsed::CalendarDate(date)) => DisplayDateTime {
                date: date.format(DATE_FORMAT).to_string(),
                time: "00:00:00".to_string(),
            },
            None => {
                tracing::warn!(timestamp, "invalid date string");
                DisplayDateTime::invalid()
            }
        }
    }

    /// Long form used by the settings preview, e.g.
    /// "Wednesday, January 15, 2025 at 10:00:00".
    pub fn preview(&self, now: DateTime<Utc>) -> String {
        now.with_timezone(&self.tz)
            .format("%A, %B %-d, %Y at %H:%M:%S")
            .to_string()
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parsed {
    Instant(DateTime<Utc>),
    CalendarDate(NaiveDate),
}

/// Read a backend timestamp.
///
/// Strings containing `T` or `Z` are ISO 8601 and keep their offset when they
/// have one. Everything else is a UTC wall-clock time (SQLite's
/// `YYYY-MM-DD HH:MM:SS`) or a bare calendar date.
pub fn parse_backend_timestamp(raw: &str) -> Option<Parsed> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.contains('T') || raw.contains('Z') {
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(Parsed::Instant(instant.with_timezone(&Utc)));
        }
        return naive_utc(raw, &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]).map(Parsed::Instant);
    }
    if let Some(instant) = naive_utc(raw, &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]) {
        return Some(Parsed::Instant(instant));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(Parsed::CalendarDate)
}

fn naive_utc(raw: &str, formats: &[&str]) -> Option<DateTime<Utc>> {
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// The zone the host reports through `Intl.DateTimeFormat`.
#[cfg(target_arch = "wasm32")]
pub fn host_timezone() -> Option<String> {
    use js_sys::{Array, Intl, Object, Reflect};
    use wasm_bindgen::JsValue;

    let format = Intl::DateTimeFormat::new(&Array::new(), &Object::new());
    let options = format.resolved_options();
    Reflect::get(&options, &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|value| value.as_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn host_timezone() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;

    #[test]
    fn formats_iso_timestamp_in_utc() {
        let ctx = TimezoneContext::new("UTC").unwrap();
        let shown = ctx.format("2025-01-15T10:00:00");
        assert_eq!(shown.date, "Jan 15, 2025");
        assert_eq!(shown.time, "10:00:00");
    }

    #[test]
    fn malformed_input_renders_invalid_markers() {
        let ctx = TimezoneContext::utc();
        assert_eq!(ctx.format("not-a-date"), DisplayDateTime::invalid());
        assert_eq!(ctx.format(""), DisplayDateTime::invalid());
        assert!(!ctx.format("2025-13-40 10:00:00").is_valid());
    }

    #[test]
    fn zone_less_sqlite_timestamps_are_utc() {
        let ctx = TimezoneContext::new("America/New_York").unwrap();
        let shown = ctx.format("2025-01-15 03:30:00");
        assert_eq!(shown.date, "Jan 14, 2025");
        assert_eq!(shown.time, "22:30:00");
    }

    #[test]
    fn explicit_offsets_are_respected() {
        let ctx = TimezoneContext::new("Asia/Tokyo").unwrap();
        let shown = ctx.format("2025-06-30T20:00:00-04:00");
        assert_eq!(shown.date, "Jul 1, 2025");
        assert_eq!(shown.time, "09:00:00");
    }

    #[test]
    fn calendar_dates_are_not_shifted() {
        let ctx = TimezoneContext::new("America/Los_Angeles").unwrap();
        let shown = ctx.format("2025-03-01");
        assert_eq!(shown.date, "Mar 1, 2025");
    }

    #[test]
    fn resolve_prefers_saved_then_host_then_utc() {
        let saved = MemoryStore::with(TIMEZONE_KEY, "Europe/Paris");
        let ctx = TimezoneContext::resolve(&saved, Some("Asia/Tokyo".to_string()));
        assert_eq!(ctx.name(), "Europe/Paris");

        let empty = MemoryStore::new();
        let ctx = TimezoneContext::resolve(&empty, Some("Asia/Tokyo".to_string()));
        assert_eq!(ctx.name(), "Asia/Tokyo");

        let broken = MemoryStore::with(TIMEZONE_KEY, "Mars/Olympus");
        let ctx = TimezoneContext::resolve(&broken, None);
        assert_eq!(ctx.name(), "UTC");
    }

    #[test]
    fn persist_writes_the_zone_name() {
        let store = MemoryStore::new();
        TimezoneContext::new("Pacific/Auckland").unwrap().persist(&store).unwrap();
        assert_eq!(store.get(TIMEZONE_KEY).as_deref(), Some("Pacific/Auckland"));
    }

    #[test]
    fn unknown_zone_is_rejected() {
        assert_eq!(
            TimezoneContext::new("Nowhere/Special"),
            Err(TimezoneError("Nowhere/Special".to_string()))
        );
    }

    #[test]
    fn preview_uses_long_form() {
        let ctx = TimezoneContext::utc();
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(ctx.preview(now), "Wednesday, January 15, 2025 at 10:00:00");
    }

    #[test]
    fn every_common_zone_parses() {
        for (name, _) in COMMON_TIMEZONES {
            assert!(TimezoneContext::new(name).is_ok(), "{name}");
        }
    }
}
