//! The process-wide timestamp layout used for date bounds in schemas.
//!
//! A schema's `maximum`/`minimum` for a `date` field are human-readable
//! timestamps, not numeric literals. They are parsed with a single
//! process-wide [chrono format string](https://docs.rs/chrono/latest/chrono/format/strftime/index.html),
//! defaulting to the long form `Jan 2, 2006 at 3:04pm (MST)`. A trailing
//! parenthesized zone name is recognized and ignored; all comparisons happen
//! in UTC seconds.

use std::sync::RwLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;

use crate::error::CompileError;

/// Layout matching `Jan 2, 2006 at 3:04pm (MST)`.
pub const DEFAULT_DATE_LAYOUT: &str = "%b %-d, %Y at %-I:%M%P";

static DATE_LAYOUT: Lazy<RwLock<String>> =
    Lazy::new(|| RwLock::new(DEFAULT_DATE_LAYOUT.to_string()));

/// Replace the process-wide date layout with a new chrono format string.
///
/// Affects every schema compiled after the call. Common alternatives:
///
/// - `"%Y-%m-%dT%H:%M:%S"` - RFC 3339 without zone offset
/// - `"%d %b %y %H:%M"` - RFC 822 style
/// - `"%Y-%m-%d"` - date only, midnight UTC
pub fn set_date_layout(layout: impl Into<String>) {
    let mut guard = DATE_LAYOUT.write().unwrap_or_else(|e| e.into_inner());
    *guard = layout.into();
}

/// The currently configured date layout.
pub fn date_layout() -> String {
    DATE_LAYOUT
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// Parse a schema-side date bound into Unix seconds using the configured
/// layout.
pub(crate) fn parse_to_unix(text: &str) -> Result<i64, CompileError> {
    parse_with_layout(text, &date_layout())
}

pub(crate) fn parse_with_layout(text: &str, layout: &str) -> Result<i64, CompileError> {
    let trimmed = strip_zone_suffix(text.trim());
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, layout) {
        return Ok(datetime.and_utc().timestamp());
    }
    // A date-only layout has no time items, so retry as a bare date at
    // midnight.
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, layout) {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp());
    }
    Err(CompileError::BadDate(text.to_string()))
}

/// Drops a trailing ` (Zone)` group, e.g. ` (MST)` in the default long form.
fn strip_zone_suffix(text: &str) -> &str {
    if text.ends_with(')') {
        if let Some(idx) = text.rfind(" (") {
            return &text[..idx];
        }
    }
    text
}
