use crate::core::{
    format::{format_count_or_dash, format_or_dash, format_percent_or_dash, DASH},
    record::StatRecord,
};

/// Headline numbers shown above the charts. Missing values stay `None` and
/// display as a dash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kpis {
    pub average_wpm: Option<f64>,
    /// Percent.
    pub average_accuracy: Option<f64>,
    pub games_played: Option<f64>,
    pub last_played: Option<String>,
}

impl Kpis {
    pub fn from_record(record: &StatRecord) -> Self {
        Self {
            average_wpm: record.average_wpm(),
            average_accuracy: record.average_accuracy(),
            games_played: record.total_games_played(),
            last_played: record.last_played(),
        }
    }

    pub fn display_wpm(&self) -> String {
        format_or_dash(self.average_wpm, 1)
    }

    pub fn display_accuracy(&self) -> String {
        format_percent_or_dash(self.average_accuracy, 1)
    }

    pub fn display_games(&self) -> String {
        format_count_or_dash(self.games_played)
    }

    pub fn display_last_played(&self) -> String {
        self.last_played.clone().unwrap_or_else(|| DASH.to_string())
    }
}
