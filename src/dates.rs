//! Day-granularity date helpers for scheduling
//!
//! Every instant the scheduler produces is a local midnight expressed in UTC.
//! Comparing such instants orders cards by whole calendar days, so a card
//! never flips between due and not-due within the same day.
//!
//! The clock-reading helpers (`today`, `add_days`, `is_due_today`) delegate
//! to anchored variants that take "today" explicitly.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Local midnight of `date`, as a UTC instant.
///
/// If a DST transition skips midnight, the first existing instant of that
/// local day is used instead.
pub fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);

    if let Some(local) = midnight.and_local_timezone(Local).earliest() {
        return local.with_timezone(&Utc);
    }

    // Gap at midnight: transitions happen on the hour, so 01:00 exists
    (midnight + Duration::hours(1))
        .and_local_timezone(Local)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// The local calendar date an instant falls on
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Today at 00:00:00.000 local time
pub fn today() -> DateTime<Utc> {
    local_midnight(Local::now().date_naive())
}

/// Midnight of the local day containing `now`
pub fn today_on(now: DateTime<Utc>) -> DateTime<Utc> {
    local_midnight(local_date(now))
}

/// Today plus `days` calendar days, midnight-normalized. `0` returns `today()`.
pub fn add_days(days: i32) -> DateTime<Utc> {
    add_days_from(today(), days)
}

/// `anchor`'s local day plus `days` calendar days, midnight-normalized.
///
/// Dates past chrono's representable range saturate at the boundary.
pub fn add_days_from(anchor: DateTime<Utc>, days: i32) -> DateTime<Utc> {
    let date = local_date(anchor);
    let shifted = date
        .checked_add_signed(Duration::days(i64::from(days)))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX });
    local_midnight(shifted)
}

/// True when `instant` is today or earlier
pub fn is_due_today(instant: DateTime<Utc>) -> bool {
    is_due_on(instant, today())
}

pub fn is_due_on(instant: DateTime<Utc>, today: DateTime<Utc>) -> bool {
    instant <= today
}

/// `YYYY-MM-DD` in local time. Display only.
pub fn format_date(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// ISO 8601 with millisecond precision and a `Z` suffix, e.g.
/// `2026-10-18T15:00:00.000Z`
pub fn to_iso_string(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse any RFC 3339 timestamp into UTC
pub fn parse_iso(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|dt| dt.with_timezone(&Utc))
}

/// Serde adapter writing instants with `to_iso_string`
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_iso_string(*instant))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso(&raw).map_err(serde::de::Error::custom)
    }
}
