use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::{AnyValue, TimeUnit};

/// Timestamp layouts recognised when a cell holds text. `%.f` also accepts
/// a missing fractional part.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Offset-carrying layout that RFC 3339 does not cover (space separator).
const OFFSET_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

/// Display text of a missing cell in the preview.
pub const NULL_CELL: &str = "<null>";

/// Text cells read as missing values, as Pandas does by default.
pub const NULL_TOKENS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL"];

/// Parse a timestamp or a bare date (midnight).
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.fff]` with a space or `T` separator, RFC 3339
/// with an offset (converted to UTC), and `YYYY-MM-DD`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|t| t.naive_utc()))
        .or_else(|| {
            DateTime::parse_from_str(s, OFFSET_TIMESTAMP_FORMAT)
                .ok()
                .map(|t| t.naive_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Interpret a cell as a point in time.
///
/// Text is parsed with [`parse_timestamp`]; typed `Date` / `Datetime` cells
/// (Parquet sources) convert directly. Anything else yields `None`.
pub fn timestamp_of(value: &AnyValue) -> Option<NaiveDateTime> {
    match value {
        AnyValue::String(s) => parse_timestamp(s),
        AnyValue::StringOwned(s) => parse_timestamp(s),
        AnyValue::Datetime(v, unit, _) => from_epoch(*v, *unit),
        AnyValue::DatetimeOwned(v, unit, _) => from_epoch(*v, *unit),
        AnyValue::Date(days) => {
            DateTime::from_timestamp(i64::from(*days) * 86_400, 0).map(|t| t.naive_utc())
        }
        _ => None,
    }
}

fn from_epoch(v: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let t = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(v)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(v),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(v),
    };
    t.map(|t| t.naive_utc())
}

/// Whether a cell is missing.
pub fn is_null(value: &AnyValue) -> bool {
    matches!(value, AnyValue::Null)
}

/// Format a cell for the preview table.
pub fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => NULL_CELL.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Datetime(..) | AnyValue::DatetimeOwned(..) | AnyValue::Date(_) => {
            match timestamp_of(value) {
                Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => value.to_string(),
            }
        }
        other => other.to_string(),
    }
}
