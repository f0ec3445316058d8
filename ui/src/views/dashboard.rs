use api::{Backend, IdentityService, UserIdentity};
use dioxus::prelude::*;

use crate::{
    charts::ChartSpec,
    components::{AppHeader, ChartCard},
    loader::{load_plan, LoadOutcome},
    stats::{ChartKind, Kpis, PlannedChart, RenderPlan, SessionRow, StatGroup},
    t,
};

/// What the body of the dashboard shows for the current fetch.
#[derive(Debug, Clone, PartialEq)]
enum Body {
    Loading,
    NoStats,
    Failed,
    Ready(RenderPlan),
}

impl From<&LoadOutcome> for Body {
    fn from(outcome: &LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::NoStats => Self::NoStats,
            LoadOutcome::Failed(_) => Self::Failed,
            LoadOutcome::Ready(plan) => Self::Ready(plan.clone()),
        }
    }
}

#[component]
pub fn DashboardScreen(user: UserIdentity) -> Element {
    let backend = use_context::<Backend>();
    let mut sign_out_error = use_signal(|| false);
    let _lang = try_use_context::<Signal<String>>().map(|code| code());

    let uid = user.uid.clone();
    let store = backend.clone();
    let mut load = use_resource(use_reactive!(|(uid,)| {
        let store = store.clone();
        async move { load_plan(&store, &uid).await }
    }));

    let body = match &*load.read() {
        Some(outcome) => Body::from(outcome),
        None => Body::Loading,
    };

    let on_sign_out = {
        let backend = backend.clone();
        move |_| {
            let backend = backend.clone();
            sign_out_error.set(false);
            spawn(async move {
                if let Err(err) = backend.sign_out().await {
                    tracing::warn!(%err, "sign-out failed");
                    sign_out_error.set(true);
                }
            });
        }
    };

    let display_name = user.display_name().to_string();

    rsx! {
        AppHeader {
            div { class: "user-chip",
                span { class: "user-chip__label", {t!("dashboard-signed-in-as")} }
                strong { class: "user-chip__email", id: "userEmail", "{display_name}" }
                button { class: "btn btn--ghost", id: "logoutBtn", onclick: on_sign_out,
                    {t!("dashboard-sign-out")}
                }
            }
        }

        main { class: "dashboard", id: "dashboardScreen",
            if sign_out_error() {
                p { class: "banner banner--error", role: "alert", {t!("dashboard-sign-out-failed")} }
            }

            {match body {
                Body::Loading => rsx! {
                    p { class: "dashboard__message", id: "loadingMessage", {t!("dashboard-loading")} }
                },
                Body::NoStats => rsx! {
                    p { class: "dashboard__message", id: "noStatsMessage", {t!("dashboard-no-stats")} }
                },
                Body::Failed => rsx! {
                    div { class: "banner banner--error", role: "alert",
                        span { {t!("dashboard-load-failed")} }
                        button { class: "btn btn--ghost", onclick: move |_| load.restart(),
                            {t!("dashboard-retry")}
                        }
                    }
                },
                Body::Ready(plan) => rsx! {
                    StatsBody { plan }
                },
            }}
        }
    }
}

#[component]
fn StatsBody(plan: RenderPlan) -> Element {
    rsx! {
        KpiRow { kpis: plan.kpis.clone() }

        if plan.charts_visible() {
            section { class: "charts-grid", id: "chartsGrid",
                h2 { class: "section-title", {t!("charts-title")} }
                div { class: "charts-grid__cards",
                    for chart in plan.charts.iter().cloned() {
                        {render_chart(chart)}
                    }
                }
            }
        }

        if !plan.groups.is_empty() {
            section { class: "all-fields", id: "allFieldsWrap",
                h2 { class: "section-title", {t!("groups-title")} }
                div { class: "stat-groups", id: "statsContent",
                    for group in plan.groups.iter().cloned() {
                        {render_group(group)}
                    }
                }
            }
        }

        if !plan.sessions.is_empty() {
            SessionTimeline { rows: plan.sessions.clone() }
        }
    }
}

#[component]
fn KpiRow(kpis: Kpis) -> Element {
    let tiles = [
        ("kpiAvgWpm", t!("kpi-average-wpm"), kpis.display_wpm()),
        ("kpiAcc", t!("kpi-accuracy"), kpis.display_accuracy()),
        ("kpiGames", t!("kpi-games"), kpis.display_games()),
        ("kpiLast", t!("kpi-last-played"), kpis.display_last_played()),
    ];

    rsx! {
        section { class: "kpi-row", id: "kpiRow",
            for (id, label, value) in tiles {
                div { key: "{id}", class: "kpi",
                    span { class: "kpi__label", "{label}" }
                    strong { class: "kpi__value", id: "{id}", "{value}" }
                }
            }
        }
    }
}

fn chart_title(kind: ChartKind) -> String {
    match kind {
        ChartKind::Quality => t!("chart-quality"),
        ChartKind::AccuracyCompare => t!("chart-accuracy-compare"),
        ChartKind::WpmHistory => t!("chart-wpm-history"),
        ChartKind::AccuracyHistory => t!("chart-accuracy-history"),
        ChartKind::Sessions => t!("chart-sessions"),
        ChartKind::TypeRush => t!("chart-type-rush"),
        ChartKind::KeyCatch => t!("chart-key-catch"),
        ChartKind::SequenceSpark => t!("chart-sequence-spark"),
    }
}

fn render_chart(chart: PlannedChart) -> Element {
    let PlannedChart { kind, spec, .. } = chart;
    let spec = match spec {
        ChartSpec::Donut {
            first,
            second,
            mut options,
        } => {
            options.first_caption = t!("chart-caption-average");
            options.second_caption = t!("chart-caption-best");
            ChartSpec::Donut {
                first,
                second,
                options,
            }
        }
        other => other,
    };

    rsx! {
        ChartCard {
            key: "{kind.slug()}",
            slug: kind.slug(),
            title: chart_title(kind),
            spec,
        }
    }
}

fn group_title(group: &StatGroup) -> String {
    match group.id {
        "overview" => t!("group-overview"),
        "speed" => t!("group-speed"),
        "accuracy" => t!("group-accuracy"),
        "errors" => t!("group-errors"),
        "reaction" => t!("group-reaction"),
        "scores" => t!("group-scores"),
        "sessions" => t!("group-sessions"),
        "keystrokes" => t!("group-keystrokes"),
        "other" => t!("group-other"),
        _ => group.title.clone(),
    }
}

fn render_group(group: StatGroup) -> Element {
    let title = group_title(&group);

    rsx! {
        section { key: "{group.id}", class: "stat-group",
            h3 { class: "stat-group-title", "{title}" }
            table { class: "stat-table",
                tbody {
                    for row in group.rows {
                        tr { key: "{row.key}",
                            td { class: "stat-label-cell", "{row.label}" }
                            td { class: "stat-value-cell", "{row.value}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SessionTimeline(rows: Vec<SessionRow>) -> Element {
    rsx! {
        section { class: "session-timeline",
            h2 { class: "section-title", {t!("sessions-title")} }
            table { class: "stat-table session-table",
                thead {
                    tr {
                        th { {t!("sessions-date")} }
                        th { {t!("sessions-wpm")} }
                        th { {t!("sessions-accuracy")} }
                        th { {t!("sessions-reaction")} }
                        th { {t!("sessions-errors")} }
                    }
                }
                tbody {
                    for (index, row) in rows.into_iter().enumerate() {
                        tr { key: "{index}",
                            td { "{row.date}" }
                            td { "{row.wpm}" }
                            td { "{row.accuracy}" }
                            td { "{row.reaction}" }
                            td { "{row.errors}" }
                        }
                    }
                }
            }
        }
    }
}
