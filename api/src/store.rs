//! Record-store collaborator: fetch the per-user statistics document.

use serde_json::{Map, Value};

use crate::error::FetchError;

/// Result of a document lookup that reached the store.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordLookup {
    Found(Map<String, Value>),
    NotFound,
}

/// Contract the dashboard needs from a document store.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Fetch the user document stored under `uid`. Called once per load.
    async fn fetch_user_record(&self, uid: &str) -> Result<RecordLookup, FetchError>;
}

/// Statistics live under the `stats` field of a user document. Anything that
/// is not an object there counts as "no stats".
pub fn extract_stats(document: &Map<String, Value>) -> Option<Map<String, Value>> {
    match document.get("stats") {
        Some(Value::Object(stats)) => Some(stats.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn stats_object_is_extracted() {
        let document = doc(json!({ "stats": { "averageWpm": 61.5 }, "email": "a@b.c" }));
        let stats = extract_stats(&document).unwrap();
        assert_eq!(stats.get("averageWpm"), Some(&json!(61.5)));
    }

    #[test]
    fn non_object_stats_is_none() {
        assert!(extract_stats(&doc(json!({ "stats": [1, 2, 3] }))).is_none());
        assert!(extract_stats(&doc(json!({ "stats": null }))).is_none());
        assert!(extract_stats(&doc(json!({ "profile": {} }))).is_none());
    }
}
