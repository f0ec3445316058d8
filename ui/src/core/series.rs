//! Normalization of history-shaped fields into ordered `{x, y}` samples.

use std::fmt;

use serde_json::{Map, Value};

use super::coerce::to_number;

/// Horizontal key of a sample: a 1-based position, a numeric stamp, or a label.
#[derive(Debug, Clone, PartialEq)]
pub enum PointKey {
    Index(usize),
    Number(f64),
    Label(String),
}

impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Number(n) => f.write_str(&super::format::number_to_string(*n)),
            Self::Label(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: PointKey,
    pub y: f64,
}

impl Point {
    pub fn new(x: PointKey, y: f64) -> Self {
        Self { x, y }
    }

    pub fn labelled(label: impl Into<String>, y: f64) -> Self {
        Self {
            x: PointKey::Label(label.into()),
            y,
        }
    }
}

/// Project a history value onto an ordered series. Never fails; an empty
/// result means there is nothing to chart.
pub fn normalize_series(value: Option<&Value>) -> Vec<Point> {
    let Some(value) = value else {
        return Vec::new();
    };

    match value {
        Value::Array(items) if items.is_empty() => Vec::new(),
        Value::Array(items) if items[0].is_number() => items
            .iter()
            .enumerate()
            .map(|(i, item)| Point::new(PointKey::Index(i + 1), to_number(item)))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| point_from_element(i, item))
            .collect(),
        Value::Object(map) => keyed_series(map),
        _ => Vec::new(),
    }
}

// Elements that are not records carry no `v`/`y`, so they sit at zero.
fn point_from_element(index: usize, item: &Value) -> Point {
    let Value::Object(record) = item else {
        return Point::new(PointKey::Index(index + 1), 0.0);
    };

    let x = first_present(record, &["t", "x"])
        .map(point_key)
        .unwrap_or(PointKey::Index(index + 1));
    let y = first_present(record, &["v", "y"])
        .map(to_number)
        .unwrap_or(0.0);

    Point::new(x, y)
}

fn keyed_series(map: &Map<String, Value>) -> Vec<Point> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|key| Point::labelled(key.clone(), to_number(&map[key])))
        .collect()
}

// `null` counts as absent so the next candidate is consulted.
fn first_present<'a>(record: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

fn point_key(value: &Value) -> PointKey {
    match value {
        Value::Number(n) => PointKey::Number(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => PointKey::Label(s.clone()),
        other => PointKey::Label(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ys(series: &[Point]) -> Vec<f64> {
        series.iter().map(|p| p.y).collect()
    }

    #[test]
    fn plain_numbers_get_one_based_index() {
        let series = normalize_series(Some(&json!([3, 5, 2])));
        assert_eq!(
            series,
            vec![
                Point::new(PointKey::Index(1), 3.0),
                Point::new(PointKey::Index(2), 5.0),
                Point::new(PointKey::Index(3), 2.0),
            ]
        );
    }

    #[test]
    fn mapping_is_key_sorted() {
        let series = normalize_series(Some(&json!({ "b": 2, "a": 1 })));
        assert_eq!(
            series,
            vec![Point::labelled("a", 1.0), Point::labelled("b", 2.0)]
        );
    }

    #[test]
    fn point_records_prefer_t_and_v() {
        let series = normalize_series(Some(&json!([
            { "t": "2024-01-01", "v": 40, "x": 9, "y": 99 },
            { "x": 5, "y": "45.5" },
            { "t": null, "v": null, "y": 50 },
            { "other": true }
        ])));

        assert_eq!(series[0].x, PointKey::Label("2024-01-01".into()));
        assert_eq!(series[1].x, PointKey::Number(5.0));
        assert_eq!(series[2].x, PointKey::Index(3));
        assert_eq!(series[3].x, PointKey::Index(4));
        assert_eq!(ys(&series), vec![40.0, 45.5, 50.0, 0.0]);
    }

    #[test]
    fn unusable_inputs_are_empty() {
        assert!(normalize_series(None).is_empty());
        assert!(normalize_series(Some(&json!(null))).is_empty());
        assert!(normalize_series(Some(&json!([]))).is_empty());
        assert!(normalize_series(Some(&json!(12))).is_empty());
        assert!(normalize_series(Some(&json!("1,2,3"))).is_empty());
        assert!(normalize_series(Some(&json!(false))).is_empty());
    }

    #[test]
    fn non_record_elements_in_a_record_series_sit_at_zero() {
        let series = normalize_series(Some(&json!([{ "v": 1 }, 7, null, "12"])));
        assert_eq!(series.len(), 4);
        assert_eq!(series[0], Point::new(PointKey::Index(1), 1.0));
        assert_eq!(series[1], Point::new(PointKey::Index(2), 0.0));
        assert_eq!(series[2], Point::new(PointKey::Index(3), 0.0));
        assert_eq!(series[3], Point::new(PointKey::Index(4), 0.0));
    }

    #[test]
    fn point_key_display() {
        assert_eq!(PointKey::Index(3).to_string(), "3");
        assert_eq!(PointKey::Number(1700000000.0).to_string(), "1700000000");
        assert_eq!(PointKey::Number(2.5).to_string(), "2.5");
        assert_eq!(PointKey::Label("Best".into()).to_string(), "Best");
    }
}
