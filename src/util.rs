use crate::error::{BugmapError, Result};
use crate::model::{DateRange, Record};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::time::Duration;

pub fn records_matching<'a>(
    records: &'a [Record],
    base_path: &'a str,
    range: &'a DateRange,
) -> impl Iterator<Item = &'a Record> + 'a {
    records
        .iter()
        .filter(move |r| range.contains(&r.date) && r.path.starts_with(base_path))
}

/// Parse an absolute timestamp as written in the bug CSV.
///
/// Accepts RFC3339, git's `%ci` layout (`2020-01-01 12:00:00 +0100`),
/// a bare `YYYY-MM-DD` (midnight UTC) or unix seconds.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|datetime| Utc.from_utc_datetime(&datetime));
    }

    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        return input
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0));
    }

    None
}

/// Parse a `--since`/`--until` value: any absolute timestamp, or a duration
/// back from now (`90d`, `2weeks`, `3 months ago`).
pub fn parse_date_arg(input: &str) -> Result<DateTime<Utc>> {
    if let Some(dt) = parse_timestamp(input) {
        return Ok(dt);
    }

    if let Some(duration) = parse_relative_duration(input) {
        return chrono::Duration::from_std(duration)
            .ok()
            .and_then(|delta| Utc::now().checked_sub_signed(delta))
            .ok_or_else(|| BugmapError::InvalidDate(format!("'{input}' reaches too far back")));
    }

    Err(BugmapError::InvalidDate(format!(
        "'{input}' is not a date (RFC3339, YYYY-MM-DD) or a duration (90d, 2weeks, 3 months ago)"
    )))
}

pub fn resolve_range(since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
    let since_dt = since.map(parse_date_arg).transpose()?;
    let until_dt = until.map(parse_date_arg).transpose()?;
    build_range(since_dt, until_dt)
}

pub(crate) fn build_range(
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
) -> Result<DateRange> {
    if let (Some(s), Some(u)) = (since, until) {
        if s > u {
            return Err(BugmapError::InvalidDate(format!(
                "Invalid range: since ({s}) is after until ({u})"
            )));
        }
    }

    let mut range = DateRange::new();
    if let Some(s) = since {
        range = range.with_since(s);
    }
    if let Some(u) = until {
        range = range.with_until(u);
    }
    Ok(range)
}

fn parse_relative_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();
    let input = input.strip_prefix('-').unwrap_or(&input);

    if let Ok(duration) = humantime::parse_duration(input) {
        return Some(duration);
    }

    parse_natural_duration(input)
}

fn parse_natural_duration(input: &str) -> Option<Duration> {
    let units = [
        (" days ago", 86400),
        (" weeks ago", 7 * 86400),
        (" months ago", 30 * 86400),
    ];

    for (suffix, secs) in units {
        if let Some(n) = input.strip_suffix(suffix) {
            if let Ok(n) = n.trim().parse::<u64>() {
                return n.checked_mul(secs).map(Duration::from_secs);
            }
        }
    }

    None
}
