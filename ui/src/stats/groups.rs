use std::collections::HashSet;

use crate::core::{
    format::{format_label, format_value},
    record::{keys, StatRecord},
};

/// A titled section of the field tables.
#[derive(Debug, Clone, PartialEq)]
pub struct StatGroup {
    pub id: &'static str,
    pub title: String,
    pub rows: Vec<StatRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub key: String,
    pub label: String,
    pub value: String,
}

impl StatRow {
    fn new(record: &StatRecord, key: &str) -> Self {
        Self {
            key: key.to_string(),
            label: format_label(key),
            value: format_value(record.get(key), key),
        }
    }
}

pub const OTHER_GROUP_ID: &str = "other";

struct GroupDef {
    id: &'static str,
    title: &'static str,
    keys: &'static [&'static str],
}

/// Section layout, in display order. A key listed twice is shown only in the
/// first section that claims it.
const GROUPS: &[GroupDef] = &[
    GroupDef {
        id: "overview",
        title: "Player Overview",
        keys: &[
            keys::USER_NAME,
            keys::BIRTHDAY,
            keys::LAST_PLAYED,
            keys::TOTAL_GAMES_PLAYED,
        ],
    },
    GroupDef {
        id: "speed",
        title: "Speed (WPM)",
        keys: &[keys::AVERAGE_WPM, keys::BEST_WPM],
    },
    GroupDef {
        id: "accuracy",
        title: "Accuracy",
        keys: &[keys::AVERAGE_ACCURACY, keys::BEST_ACCURACY],
    },
    GroupDef {
        id: "errors",
        title: "Errors & Mistakes",
        keys: &[keys::AVERAGE_MISTAKES_PER_GAME, keys::TOTAL_MISTAKES],
    },
    GroupDef {
        id: "reaction",
        title: "Reaction Time",
        keys: &[keys::AVERAGE_REACTION_TIME, keys::BEST_REACTION_TIME],
    },
    GroupDef {
        id: "scores",
        title: "Best Scores",
        keys: &[keys::BEST_KEY_CATCH_SCORE, keys::BEST_SEQUENCE_SCORE],
    },
    GroupDef {
        id: "sessions",
        title: "Sessions by Game",
        keys: &[
            keys::TYPE_RUSH_SESSIONS,
            keys::KEY_CATCH_SESSIONS,
            keys::SEQUENCE_SPARK_SESSIONS,
        ],
    },
    GroupDef {
        id: "keystrokes",
        title: "Keystrokes",
        keys: &[keys::TOTAL_KEYSTROKES],
    },
];

/// Every field of the record, grouped. Fields no section claims land in a
/// trailing "Other" section sorted by key, so nothing is dropped.
pub fn build_groups(record: &StatRecord) -> Vec<StatGroup> {
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut groups = Vec::new();

    for def in GROUPS {
        let rows: Vec<StatRow> = def
            .keys
            .iter()
            .copied()
            .filter(|key| record.contains(key) && claimed.insert(*key))
            .map(|key| StatRow::new(record, key))
            .collect();

        if !rows.is_empty() {
            groups.push(StatGroup {
                id: def.id,
                title: def.title.to_string(),
                rows,
            });
        }
    }

    let mut leftover: Vec<&str> = record.keys().filter(|key| !claimed.contains(key)).collect();
    if !leftover.is_empty() {
        leftover.sort_unstable();
        groups.push(StatGroup {
            id: OTHER_GROUP_ID,
            title: "Other".to_string(),
            rows: leftover
                .into_iter()
                .map(|key| StatRow::new(record, key))
                .collect(),
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn titles(groups: &[StatGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.title.as_str()).collect()
    }

    #[test]
    fn empty_record_has_no_groups() {
        assert!(build_groups(&StatRecord::default()).is_empty());
    }

    #[test]
    fn groups_follow_table_order() {
        let record = StatRecord::from_value(json!({
            "totalKeystrokes": 41230,
            "bestWpm": 88.1,
            "userName": "ada",
            "averageWpm": 61,
        }));
        let groups = build_groups(&record);
        assert_eq!(titles(&groups), vec!["Player Overview", "Speed (WPM)", "Keystrokes"]);

        let speed = &groups[1];
        assert_eq!(speed.rows[0].label, "Average Wpm");
        assert_eq!(speed.rows[0].value, "61.00");
        assert_eq!(speed.rows[1].key, "bestWpm");
        assert_eq!(groups[2].rows[0].value, "41,230");
    }

    #[test]
    fn null_counts_as_present() {
        let record = StatRecord::from_value(json!({ "birthday": null }));
        let groups = build_groups(&record);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].rows[0].value, "N/A");
    }

    #[test]
    fn unknown_keys_fall_into_sorted_other() {
        let record = StatRecord::from_value(json!({
            "zeta": 1,
            "averageWpm": 50,
            "alpha": true,
            "sessions": [],
        }));
        let groups = build_groups(&record);
        let other = groups.last().unwrap();
        assert_eq!(other.id, OTHER_GROUP_ID);
        let keys: Vec<_> = other.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "sessions", "zeta"]);
        assert_eq!(other.rows[0].value, "Yes");
    }

    #[test]
    fn every_key_is_rendered_exactly_once() {
        let record = StatRecord::from_value(json!({
            "userName": "ada",
            "lastPlayed": 1_700_000_000,
            "averageAccuracy": 0.9,
            "typeRushSessions": 3,
            "favoriteLayout": "dvorak",
            "wpmHistory": [1, 2],
        }));
        let groups = build_groups(&record);
        let mut rendered: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.rows.iter().map(|r| r.key.as_str()))
            .collect();
        rendered.sort_unstable();
        let mut expected: Vec<&str> = record.keys().collect();
        expected.sort_unstable();
        assert_eq!(rendered, expected);
    }

    #[test]
    fn no_other_group_when_all_keys_claimed() {
        let record = StatRecord::from_value(json!({ "bestAccuracy": 97 }));
        assert_eq!(titles(&build_groups(&record)), vec!["Accuracy"]);
    }
}
