//! Projection of a statistics record into everything the dashboard shows.

mod charts;
mod groups;
mod kpi;
mod sessions;

pub use charts::{plan_charts, ChartKind, PlannedChart};
pub use groups::{build_groups, StatGroup, StatRow, OTHER_GROUP_ID};
pub use kpi::Kpis;
pub use sessions::{session_rows, SessionRow};

use crate::core::record::StatRecord;

/// Display-ready view of one record. Rebuilt from scratch on every fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPlan {
    pub kpis: Kpis,
    pub charts: Vec<PlannedChart>,
    pub groups: Vec<StatGroup>,
    pub sessions: Vec<SessionRow>,
}

impl RenderPlan {
    /// Whether the chart grid has anything to show.
    pub fn charts_visible(&self) -> bool {
        !self.charts.is_empty()
    }

    pub fn chart(&self, kind: ChartKind) -> Option<&PlannedChart> {
        self.charts.iter().find(|chart| chart.kind == kind)
    }
}

/// Pure: the same record always yields the same plan.
pub fn project(record: &StatRecord) -> RenderPlan {
    let plan = RenderPlan {
        kpis: Kpis::from_record(record),
        charts: plan_charts(record),
        groups: build_groups(record),
        sessions: session_rows(record),
    };

    tracing::debug!(
        fields = record.len(),
        charts = plan.charts.len(),
        groups = plan.groups.len(),
        sessions = plan.sessions.len(),
        "projected stat record"
    );
    plan
}
