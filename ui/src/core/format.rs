//! Formatting helpers for presenting record fields: labels derived from keys
//! and display strings derived from values.

use serde_json::Value;

use super::coerce::{percent_of, to_date_time};

/// Placeholder for values that cannot be shown.
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder used by KPI tiles.
pub const DASH: &str = "—";

/// Keys holding timestamps (case-insensitive substring match).
const TIME_PATTERNS: &[&str] = &["lastplayed", "birthday"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberRule {
    Fixed2,
    Percent2,
}

/// Number formatting by key pattern, checked in order; first match wins.
const NUMBER_RULES: &[(&str, NumberRule)] = &[
    ("reactiontime", NumberRule::Fixed2),
    ("accuracy", NumberRule::Percent2),
    ("wpm", NumberRule::Fixed2),
];

/// `"averageWpm"` → `"Average Wpm"`: a space before every ASCII capital, the
/// first character upper-cased, surrounding whitespace trimmed.
pub fn format_label(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let mut chars = spaced.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    capitalized.trim().to_string()
}

/// Display string for a record field, dispatched on key pattern then value type.
pub fn format_value(value: Option<&Value>, key: &str) -> String {
    let value = match value {
        None | Some(Value::Null) => return NOT_AVAILABLE.to_string(),
        Some(value) => value,
    };
    let key_lower = key.to_ascii_lowercase();

    if TIME_PATTERNS.iter().any(|p| key_lower.contains(p)) {
        return to_date_time(value).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    }

    match value {
        Value::Number(n) => {
            let n = n.as_f64().unwrap_or(f64::NAN);
            let rule = NUMBER_RULES
                .iter()
                .find(|(pattern, _)| key_lower.contains(pattern))
                .map(|(_, rule)| *rule);
            match rule {
                Some(NumberRule::Fixed2) => to_fixed(n, 2),
                Some(NumberRule::Percent2) => to_fixed(percent_of(n), 2),
                None if n.fract() == 0.0 => group_thousands(n),
                None => group_thousands(round_to(n, 2)),
            }
        }
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        other => value_to_string(other),
    }
}

/// Fixed-point rendering with `digits` decimals (`NaN`/`Infinity` spelled out).
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    format!("{value:.digits$}")
}

pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Thousands-separated rendering with at most three fraction digits:
/// `1234567` → `"1,234,567"`, `1234.5` → `"1,234.5"`.
pub fn group_thousands(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    let is_zero = grouped.chars().all(|c| c == '0' || c == '.' || c == ',');
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Shortest decimal rendering of a number: integral values carry no fraction.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 {
        if value == 0.0 {
            return "0".to_string();
        }
        return format!("{value:.0}");
    }
    format!("{value}")
}

/// KPI rendering: `digits` decimals, or a dash when the value is missing.
pub fn format_or_dash(value: Option<f64>, digits: usize) -> String {
    value
        .filter(|v| v.is_finite())
        .map(|v| to_fixed(v, digits))
        .unwrap_or_else(|| DASH.to_string())
}

pub fn format_percent_or_dash(value: Option<f64>, digits: usize) -> String {
    value
        .filter(|v| v.is_finite())
        .map(|v| format!("{}%", to_fixed(v, digits)))
        .unwrap_or_else(|| DASH.to_string())
}

pub fn format_count_or_dash(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map(group_thousands)
        .unwrap_or_else(|| DASH.to_string())
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(n) => number_to_string(n.as_f64().unwrap_or(f64::NAN)),
        Value::Array(items) if items.iter().all(is_scalar) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fmt(value: Value, key: &str) -> String {
        format_value(Some(&value), key)
    }

    #[test]
    fn labels_split_camel_case() {
        assert_eq!(format_label("averageWpm"), "Average Wpm");
        assert_eq!(format_label("totalGamesPlayed"), "Total Games Played");
        assert_eq!(format_label("games"), "Games");
        assert_eq!(format_label("AverageWpm"), "Average Wpm");
        assert_eq!(format_label(""), "");
    }

    #[test]
    fn all_caps_label_is_letter_spaced() {
        assert_eq!(format_label("WPM"), "W P M");
        assert_eq!(format_label("bestWPM"), "Best W P M");
    }

    #[test]
    fn missing_and_null_are_not_available() {
        assert_eq!(format_value(None, "anything"), "N/A");
        assert_eq!(fmt(json!(null), "anything"), "N/A");
    }

    #[test]
    fn time_keys_win_over_numbers() {
        assert_eq!(fmt(json!(1_700_000_000), "lastPlayed"), "2023-11-14 22:13:20");
        assert_eq!(fmt(json!("1999-12-31"), "Birthday"), "1999-12-31 00:00:00");
        assert_eq!(fmt(json!("soon"), "lastPlayed"), "N/A");
        assert_eq!(fmt(json!(true), "lastPlayed"), "N/A");
    }

    #[test]
    fn numeric_rules_by_key() {
        assert_eq!(fmt(json!(0.873), "averageAccuracy"), "87.30");
        assert_eq!(fmt(json!(96), "bestAccuracy"), "96.00");
        assert_eq!(fmt(json!(312.456), "averageReactionTime"), "312.46");
        assert_eq!(fmt(json!(61), "averageWpm"), "61.00");
        assert_eq!(fmt(json!(42), "totalGamesPlayed"), "42");
        assert_eq!(fmt(json!(41230), "totalKeystrokes"), "41,230");
        assert_eq!(fmt(json!(1234.567), "someScore"), "1,234.57");
        assert_eq!(fmt(json!(3.4), "averageMistakesPerGame"), "3.4");
    }

    #[test]
    fn reaction_time_precedes_accuracy() {
        assert_eq!(fmt(json!(0.5), "reactionTimeAccuracy"), "0.50");
    }

    #[test]
    fn booleans_and_strings() {
        assert_eq!(fmt(json!(true), "soundEnabled"), "Yes");
        assert_eq!(fmt(json!(false), "soundEnabled"), "No");
        assert_eq!(fmt(json!("QWERTY"), "favoriteLayout"), "QWERTY");
        assert_eq!(fmt(json!("87"), "averageAccuracy"), "87");
    }

    #[test]
    fn collections_stringify() {
        assert_eq!(fmt(json!([3, 5, null, "x"]), "history"), "3,5,,x");
        assert_eq!(fmt(json!({ "a": 1 }), "extra"), r#"{"a":1}"#);
        assert_eq!(fmt(json!([{ "v": 1 }]), "points"), r#"[{"v":1}]"#);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(-1234567.0), "-1,234,567");
        assert_eq!(group_thousands(1234.5), "1,234.5");
        assert_eq!(group_thousands(-0.0001), "0");
    }

    #[test]
    fn kpi_placeholders() {
        assert_eq!(format_or_dash(Some(62.37), 1), "62.4");
        assert_eq!(format_or_dash(Some(f64::NAN), 1), "—");
        assert_eq!(format_or_dash(None, 1), "—");
        assert_eq!(format_percent_or_dash(Some(94.12), 1), "94.1%");
        assert_eq!(format_count_or_dash(Some(1480.0)), "1,480");
    }
}
