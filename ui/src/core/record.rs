//! The per-user statistics document as a typed open map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::coerce::{to_date_time, to_integer, to_number, to_percent};

/// Field names of the statistics document the dashboard understands.
pub mod keys {
    pub const USER_NAME: &str = "userName";
    pub const BIRTHDAY: &str = "birthday";
    pub const LAST_PLAYED: &str = "lastPlayed";
    pub const TOTAL_GAMES_PLAYED: &str = "totalGamesPlayed";
    pub const AVERAGE_WPM: &str = "averageWpm";
    pub const BEST_WPM: &str = "bestWpm";
    pub const AVERAGE_ACCURACY: &str = "averageAccuracy";
    pub const BEST_ACCURACY: &str = "bestAccuracy";
    pub const AVERAGE_MISTAKES_PER_GAME: &str = "averageMistakesPerGame";
    pub const TOTAL_MISTAKES: &str = "totalMistakes";
    pub const AVERAGE_REACTION_TIME: &str = "averageReactionTime";
    pub const BEST_REACTION_TIME: &str = "bestReactionTime";
    pub const BEST_KEY_CATCH_SCORE: &str = "bestKeyCatchScore";
    pub const BEST_SEQUENCE_SCORE: &str = "bestSequenceScore";
    pub const TYPE_RUSH_SESSIONS: &str = "typeRushSessions";
    pub const KEY_CATCH_SESSIONS: &str = "keyCatchSessions";
    pub const SEQUENCE_SPARK_SESSIONS: &str = "sequenceSparkSessions";
    pub const TOTAL_KEYSTROKES: &str = "totalKeystrokes";
    pub const SESSIONS: &str = "sessions";

    /// History candidates, consulted in order; the first present one wins.
    pub const WPM_HISTORY: &[&str] = &["wpmHistory", "wpmByDate", "wpmSeries"];
    pub const ACCURACY_HISTORY: &[&str] = &["accuracyHistory", "accuracyByDate", "accuracySeries"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatRecord(Map<String, Value>);

impl StatRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build from any JSON value; non-objects give an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Presence test; a `null` field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// First candidate whose value is present and not `null`.
    pub fn first_present(&self, candidates: &[&str]) -> Option<&Value> {
        candidates
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_null())
    }

    /// Raw coercions: `NaN` when absent or non-numeric.
    pub fn number(&self, key: &str) -> f64 {
        self.get(key).map(to_number).unwrap_or(f64::NAN)
    }

    pub fn integer(&self, key: &str) -> f64 {
        self.get(key).map(to_integer).unwrap_or(f64::NAN)
    }

    pub fn percent(&self, key: &str) -> f64 {
        self.get(key).map(to_percent).unwrap_or(f64::NAN)
    }

    pub fn date_time(&self, key: &str) -> Option<String> {
        self.get(key).and_then(to_date_time)
    }

    pub fn average_wpm(&self) -> Option<f64> {
        finite(self.number(keys::AVERAGE_WPM))
    }

    pub fn best_wpm(&self) -> Option<f64> {
        finite(self.number(keys::BEST_WPM))
    }

    /// Average accuracy in percent.
    pub fn average_accuracy(&self) -> Option<f64> {
        finite(self.percent(keys::AVERAGE_ACCURACY))
    }

    /// Best accuracy in percent.
    pub fn best_accuracy(&self) -> Option<f64> {
        finite(self.percent(keys::BEST_ACCURACY))
    }

    pub fn average_mistakes_per_game(&self) -> Option<f64> {
        finite(self.number(keys::AVERAGE_MISTAKES_PER_GAME))
    }

    pub fn total_games_played(&self) -> Option<f64> {
        finite(self.integer(keys::TOTAL_GAMES_PLAYED))
    }

    pub fn total_keystrokes(&self) -> Option<f64> {
        finite(self.integer(keys::TOTAL_KEYSTROKES))
    }

    pub fn total_mistakes(&self) -> Option<f64> {
        finite(self.integer(keys::TOTAL_MISTAKES))
    }

    pub fn type_rush_sessions(&self) -> Option<f64> {
        finite(self.integer(keys::TYPE_RUSH_SESSIONS))
    }

    pub fn key_catch_sessions(&self) -> Option<f64> {
        finite(self.integer(keys::KEY_CATCH_SESSIONS))
    }

    pub fn sequence_spark_sessions(&self) -> Option<f64> {
        finite(self.integer(keys::SEQUENCE_SPARK_SESSIONS))
    }

    pub fn best_key_catch_score(&self) -> Option<f64> {
        finite(self.number(keys::BEST_KEY_CATCH_SCORE))
    }

    pub fn best_sequence_score(&self) -> Option<f64> {
        finite(self.number(keys::BEST_SEQUENCE_SCORE))
    }

    pub fn last_played(&self) -> Option<String> {
        self.date_time(keys::LAST_PLAYED)
    }

    pub fn wpm_history(&self) -> Option<&Value> {
        self.first_present(keys::WPM_HISTORY)
    }

    pub fn accuracy_history(&self) -> Option<&Value> {
        self.first_present(keys::ACCURACY_HISTORY)
    }

    pub fn sessions(&self) -> &[Value] {
        self.get(keys::SESSIONS)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl From<Map<String, Value>> for StatRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
