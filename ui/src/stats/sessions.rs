use serde_json::Value;

use crate::core::{
    coerce::to_date_time,
    format::{format_value, NOT_AVAILABLE},
    record::StatRecord,
};

/// One played session, formatted for the timeline table.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub date: String,
    pub wpm: String,
    pub accuracy: String,
    pub reaction: String,
    pub errors: String,
}

impl SessionRow {
    fn from_entry(entry: &serde_json::Map<String, Value>) -> Self {
        // Unparseable date strings are shown as recorded.
        let date = entry
            .get("date")
            .and_then(|value| to_date_time(value).or_else(|| value.as_str().map(str::to_string)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Self {
            date,
            wpm: format_value(entry.get("wpm"), "wpm"),
            accuracy: format_value(entry.get("accuracy"), "accuracy"),
            reaction: format_value(entry.get("reactionMs"), "reactionTime"),
            errors: format_value(entry.get("errors"), "errors"),
        }
    }
}

/// Timeline rows in recorded order. Entries that are not objects are skipped.
pub fn session_rows(record: &StatRecord) -> Vec<SessionRow> {
    record
        .sessions()
        .iter()
        .filter_map(Value::as_object)
        .map(SessionRow::from_entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_each_column() {
        let record = StatRecord::from_value(json!({
            "sessions": [
                { "date": 1_700_000_000, "wpm": 61.234, "accuracy": 0.95, "reactionMs": 312.5, "errors": 3 },
                { "date": "last tuesday", "wpm": 58 },
                { "accuracy": 97 },
            ]
        }));
        let rows = session_rows(&record);
        assert_eq!(rows.len(), 3);

        assert_eq!(
            rows[0],
            SessionRow {
                date: "2023-11-14 22:13:20".into(),
                wpm: "61.23".into(),
                accuracy: "95.00".into(),
                reaction: "312.50".into(),
                errors: "3".into(),
            }
        );
        assert_eq!(rows[1].date, "last tuesday");
        assert_eq!(rows[1].accuracy, "N/A");
        assert_eq!(rows[2].date, "N/A");
        assert_eq!(rows[2].accuracy, "97.00");
    }

    #[test]
    fn skips_non_object_entries() {
        let record = StatRecord::from_value(json!({ "sessions": [1, null, { "wpm": 40 }, "x"] }));
        assert_eq!(session_rows(&record).len(), 1);
    }

    #[test]
    fn missing_or_malformed_sessions_are_empty() {
        assert!(session_rows(&StatRecord::default()).is_empty());
        let record = StatRecord::from_value(json!({ "sessions": { "a": 1 } }));
        assert!(session_rows(&record).is_empty());
    }
}
