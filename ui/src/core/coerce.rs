//! Coercion of loosely-typed record values into numbers, percentages and
//! timestamps. Every function is total: unusable input yields `NaN` or `None`.

use serde_json::Value;
use time::{
    format_description::well_known::{Rfc2822, Rfc3339},
    macros::format_description,
    Date, OffsetDateTime, PrimitiveDateTime,
};

/// Epoch values above this are milliseconds; this value and below are seconds.
pub const MILLIS_THRESHOLD: f64 = 1e12;

/// Convert any value to `f64`. Non-numeric input (including `null`) is `NaN`.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Value::String(raw) => parse_numeric_str(raw),
        Value::Array(items) if items.len() == 1 => to_number(&items[0]),
        _ => f64::NAN,
    }
}

/// Same as [`to_number`] for a possibly absent field.
pub fn to_number_opt(value: Option<&Value>) -> f64 {
    value.map(to_number).unwrap_or(f64::NAN)
}

/// Truncate toward zero; `NaN` when the input is not finite.
pub fn to_integer(value: &Value) -> f64 {
    let n = to_number(value);
    if n.is_finite() {
        n.trunc()
    } else {
        f64::NAN
    }
}

/// Fractions (`<= 1`) are scaled to percent, larger values pass through.
///
/// A whole-number percentage below 1 (e.g. a genuine 0.5 %) is read as a
/// fraction and becomes 50. The record alone cannot tell the two apart.
pub fn to_percent(value: &Value) -> f64 {
    percent_of(to_number(value))
}

pub fn percent_of(n: f64) -> f64 {
    if n <= 1.0 {
        n * 100.0
    } else {
        n
    }
}

/// Canonical `YYYY-MM-DD HH:MM:SS` (UTC) for an epoch number or a date string.
pub fn to_date_time(value: &Value) -> Option<String> {
    let moment = match value {
        Value::Number(n) => from_epoch(n.as_f64()?)?,
        Value::String(raw) => parse_date_str(raw)?,
        _ => return None,
    };
    Some(format_moment(moment))
}

fn from_epoch(raw: f64) -> Option<OffsetDateTime> {
    if !raw.is_finite() {
        return None;
    }
    let millis = if raw > MILLIS_THRESHOLD {
        raw
    } else {
        raw * 1000.0
    };
    let nanos = (millis.floor() as i128).checked_mul(1_000_000)?;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
}

fn parse_date_str(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(moment);
    }
    if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
        return Some(moment);
    }

    let naive_formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
    ];
    for format in naive_formats {
        if let Ok(moment) = PrimitiveDateTime::parse(raw, format) {
            return Some(moment.assume_utc());
        }
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

fn format_moment(moment: OffsetDateTime) -> String {
    let moment = moment.to_offset(time::UtcOffset::UTC);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        moment.year(),
        moment.month() as u8,
        moment.day(),
        moment.hour(),
        moment.minute(),
        moment.second()
    )
}

fn parse_numeric_str(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }

    let (sign, body) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    if body == "Infinity" {
        return sign * f64::INFINITY;
    }
    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        // Hex literals carry no sign.
        if sign < 0.0 || trimmed.starts_with('+') {
            return f64::NAN;
        }
        return u64::from_str_radix(hex, 16)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    if body.starts_with(['+', '-']) {
        return f64::NAN;
    }
    // Rust accepts "inf"/"nan" spellings that are not numeric literals here.
    let is_decimal = body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !is_decimal {
        return f64::NAN;
    }

    body.parse::<f64>().map(|n| sign * n).unwrap_or(f64::NAN)
}
