//! Per-chart eligibility. Each chart decides on its own whether the record
//! carries enough non-degenerate data; none depends on another.

use crate::{
    charts::{BarOptions, ChartSpec, DonutOptions, LineOptions},
    core::{
        coerce::percent_of,
        format::round_to,
        record::{keys, StatRecord},
        series::{normalize_series, Point},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Quality,
    AccuracyCompare,
    WpmHistory,
    AccuracyHistory,
    Sessions,
    TypeRush,
    KeyCatch,
    SequenceSpark,
}

impl ChartKind {
    pub const ALL: [ChartKind; 8] = [
        ChartKind::Quality,
        ChartKind::AccuracyCompare,
        ChartKind::WpmHistory,
        ChartKind::AccuracyHistory,
        ChartKind::Sessions,
        ChartKind::TypeRush,
        ChartKind::KeyCatch,
        ChartKind::SequenceSpark,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Quality => "Overall Typing Quality",
            Self::AccuracyCompare => "Accuracy: Best vs Average",
            Self::WpmHistory => "WPM Over Time",
            Self::AccuracyHistory => "Accuracy Over Time",
            Self::Sessions => "Sessions by Game",
            Self::TypeRush => "Type Rush Overview",
            Self::KeyCatch => "Key Catch Overview",
            Self::SequenceSpark => "Sequence Spark Overview",
        }
    }

    /// Stable identifier, used for element ids and lookups.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::AccuracyCompare => "accuracy-compare",
            Self::WpmHistory => "wpm-history",
            Self::AccuracyHistory => "accuracy-history",
            Self::Sessions => "sessions",
            Self::TypeRush => "type-rush",
            Self::KeyCatch => "key-catch",
            Self::SequenceSpark => "sequence-spark",
        }
    }

    fn plan(self, inputs: &ChartInputs) -> Option<ChartSpec> {
        match self {
            Self::Quality => quality(inputs),
            Self::AccuracyCompare => accuracy_compare(inputs),
            Self::WpmHistory => wpm_history(inputs),
            Self::AccuracyHistory => accuracy_history(inputs),
            Self::Sessions => sessions(inputs),
            Self::TypeRush => type_rush(inputs),
            Self::KeyCatch => key_catch(inputs),
            Self::SequenceSpark => sequence_spark(inputs),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedChart {
    pub kind: ChartKind,
    pub title: String,
    pub spec: ChartSpec,
}

/// Every chart the record qualifies for, in display order.
pub fn plan_charts(record: &StatRecord) -> Vec<PlannedChart> {
    let inputs = ChartInputs::from_record(record);
    ChartKind::ALL
        .into_iter()
        .filter_map(|kind| {
            kind.plan(&inputs).map(|spec| PlannedChart {
                kind,
                title: kind.title().to_string(),
                spec,
            })
        })
        .collect()
}

/// Raw coercions read once per projection; `NaN` marks missing values.
struct ChartInputs<'a> {
    record: &'a StatRecord,
    average_wpm: f64,
    best_wpm: f64,
    average_accuracy_pct: f64,
    best_accuracy: f64,
    average_mistakes: f64,
    total_games: f64,
    type_rush_sessions: f64,
    key_catch_sessions: f64,
    sequence_spark_sessions: f64,
    best_key_catch_score: f64,
    best_sequence_score: f64,
    total_keystrokes: f64,
    total_mistakes: f64,
}

impl<'a> ChartInputs<'a> {
    fn from_record(record: &'a StatRecord) -> Self {
        Self {
            record,
            average_wpm: record.number(keys::AVERAGE_WPM),
            best_wpm: record.number(keys::BEST_WPM),
            average_accuracy_pct: record.percent(keys::AVERAGE_ACCURACY),
            best_accuracy: record.number(keys::BEST_ACCURACY),
            average_mistakes: record.number(keys::AVERAGE_MISTAKES_PER_GAME),
            total_games: record.integer(keys::TOTAL_GAMES_PLAYED),
            type_rush_sessions: record.integer(keys::TYPE_RUSH_SESSIONS),
            key_catch_sessions: record.integer(keys::KEY_CATCH_SESSIONS),
            sequence_spark_sessions: record.integer(keys::SEQUENCE_SPARK_SESSIONS),
            best_key_catch_score: record.number(keys::BEST_KEY_CATCH_SCORE),
            best_sequence_score: record.number(keys::BEST_SEQUENCE_SCORE),
            total_keystrokes: record.integer(keys::TOTAL_KEYSTROKES),
            total_mistakes: record.integer(keys::TOTAL_MISTAKES),
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Collects `(label, value)` bars, skipping non-positive metrics.
#[derive(Default)]
struct Bars {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl Bars {
    fn push_positive(&mut self, label: &str, value: f64) {
        self.push_rounded(label, value, None);
    }

    /// Positivity is judged on the raw value; the bar shows it rounded.
    fn push_rounded(&mut self, label: &str, value: f64, digits: Option<i32>) {
        if positive(value) {
            self.labels.push(label.to_string());
            self.values
                .push(digits.map_or(value, |digits| round_to(value, digits)));
        }
    }

    fn into_spec(self, color: &str) -> Option<ChartSpec> {
        if self.labels.is_empty() {
            return None;
        }
        Some(ChartSpec::Bar {
            labels: self.labels,
            values: self.values,
            options: BarOptions::with_color(color),
        })
    }
}

fn quality(inputs: &ChartInputs) -> Option<ChartSpec> {
    let keys_per_game = if inputs.total_keystrokes.is_finite() && positive(inputs.total_games) {
        inputs.total_keystrokes / inputs.total_games
    } else {
        f64::NAN
    };

    let mut bars = Bars::default();
    bars.push_rounded("Accuracy %", inputs.average_accuracy_pct, Some(1));
    bars.push_rounded("Mistakes / Game", inputs.average_mistakes, Some(2));
    bars.push_rounded("Key Presses / Game", keys_per_game, Some(1));
    bars.into_spec("#10b981")
}

fn accuracy_compare(inputs: &ChartInputs) -> Option<ChartSpec> {
    if !inputs.average_accuracy_pct.is_finite() || !inputs.best_accuracy.is_finite() {
        return None;
    }
    Some(ChartSpec::Donut {
        first: round_to(inputs.average_accuracy_pct, 1),
        second: round_to(percent_of(inputs.best_accuracy), 1),
        options: DonutOptions::default(),
    })
}

fn finite_series(points: Vec<Point>) -> Vec<Point> {
    points.into_iter().filter(|p| p.y.is_finite()).collect()
}

fn wpm_history(inputs: &ChartInputs) -> Option<ChartSpec> {
    let history = finite_series(normalize_series(inputs.record.wpm_history()));

    let series = if history.len() >= 2 {
        history
    } else if inputs.average_wpm.is_finite() && inputs.best_wpm.is_finite() {
        vec![
            Point::labelled("Average", round_to(inputs.average_wpm, 1)),
            Point::labelled("Best", round_to(inputs.best_wpm, 1)),
        ]
    } else {
        return None;
    };

    Some(ChartSpec::Line {
        series,
        options: LineOptions {
            fill: "rgba(249,115,22,0.12)".to_string(),
            ..LineOptions::default()
        },
    })
}

fn accuracy_history(inputs: &ChartInputs) -> Option<ChartSpec> {
    let series: Vec<Point> = normalize_series(inputs.record.accuracy_history())
        .into_iter()
        .map(|p| Point::new(p.x, percent_of(p.y)))
        .filter(|p| p.y.is_finite())
        .collect();

    if series.len() < 2 {
        return None;
    }
    Some(ChartSpec::Line {
        series,
        options: LineOptions {
            color: "#22c55e".to_string(),
            fill: "rgba(34,197,94,0.12)".to_string(),
            ..LineOptions::default()
        },
    })
}

fn sessions(inputs: &ChartInputs) -> Option<ChartSpec> {
    let counts = [
        inputs.type_rush_sessions,
        inputs.key_catch_sessions,
        inputs.sequence_spark_sessions,
    ]
    .map(|v| if v.is_finite() { v } else { 0.0 });

    if counts.iter().sum::<f64>() <= 0.0 {
        return None;
    }
    Some(ChartSpec::Bar {
        labels: ["Type Rush", "Key Catch", "Sequence Spark"]
            .map(String::from)
            .to_vec(),
        values: counts.to_vec(),
        options: BarOptions::with_color("#7c3aed"),
    })
}

fn type_rush(inputs: &ChartInputs) -> Option<ChartSpec> {
    if !positive(inputs.type_rush_sessions) || !positive(inputs.average_wpm) {
        return None;
    }
    Some(ChartSpec::Bar {
        labels: vec!["Sessions".to_string(), "Avg WPM".to_string()],
        values: vec![inputs.type_rush_sessions, round_to(inputs.average_wpm, 1)],
        options: BarOptions::with_color("#6366f1"),
    })
}

fn key_catch(inputs: &ChartInputs) -> Option<ChartSpec> {
    let mut bars = Bars::default();
    bars.push_positive("Sessions", inputs.key_catch_sessions);
    bars.push_rounded("Best Score", inputs.best_key_catch_score, Some(0));
    bars.into_spec("#ec4899")
}

fn sequence_spark(inputs: &ChartInputs) -> Option<ChartSpec> {
    let mut bars = Bars::default();
    bars.push_positive("Sessions", inputs.sequence_spark_sessions);
    bars.push_rounded("Best Score", inputs.best_sequence_score, Some(0));
    bars.push_positive("Keystrokes", inputs.total_keystrokes);
    bars.push_positive("Mistakes", inputs.total_mistakes);
    bars.into_spec("#0ea5e9")
}
