use dioxus::prelude::*;

use crate::charts::ChartSpec;

/// One chart in the grid. The canvas measures itself once mounted and the
/// chart is re-rendered at that width; until then the default width is used.
#[component]
pub fn ChartCard(slug: &'static str, title: String, spec: ChartSpec) -> Element {
    let mut width = use_signal(|| None::<f64>);
    let markup = spec.to_markup(width());

    rsx! {
        article { class: "chart-card", id: "{slug}-card",
            h3 { class: "chart-card__title", "{title}" }
            div {
                class: "chart-card__canvas",
                id: "{slug}-chart",
                onmounted: move |evt: MountedEvent| async move {
                    match evt.get_client_rect().await {
                        Ok(rect) => width.set(Some(rect.size.width)),
                        Err(err) => tracing::debug!(?err, "chart canvas not measurable"),
                    }
                },
                dangerous_inner_html: "{markup}",
            }
        }
    }
}
