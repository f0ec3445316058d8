use dioxus::prelude::*;

use crate::i18n;
use crate::t;

/// Brand bar with the language picker. `children` fill the right-hand slot
/// (the signed-in user and sign-out button on the dashboard).
///
/// When the launcher provides a `Signal<String>` language context, switching
/// language writes it so every component reading it re-renders with the new
/// bundle.
#[component]
pub fn AppHeader(children: Element) -> Element {
    i18n::init();

    let mut current_lang = use_signal(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    // Subscribe to the shared language code so labels refresh on switch.
    let _lang_marker = lang_code_ctx.as_ref().map(|code| code()).unwrap_or_default();

    let on_change = move |evt: FormEvent| {
        let tag = evt.value();
        match i18n::set_language(&tag) {
            Ok(()) => {
                tracing::info!(%tag, "language switched");
                current_lang.set(tag.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(tag);
                }
            }
            Err(err) => tracing::warn!(%tag, %err, "language switch failed"),
        }
    };

    rsx! {
        header { class: "app-header",
            div { class: "app-header__inner",
                div { class: "app-header__brand",
                    span { class: "app-header__mark", aria_hidden: "true", "⌨" }
                    div {
                        span { class: "app-header__name", {t!("app-name")} }
                        span { class: "app-header__tagline", {t!("app-tagline")} }
                    }
                }

                div { class: "app-header__actions",
                    {children}

                    if show_switcher {
                        div { class: "app-header__locale",
                            label {
                                class: "visually-hidden",
                                r#for: "locale-select",
                                {t!("nav-language-label")}
                            }
                            select {
                                id: "locale-select",
                                value: "{current_lang()}",
                                oninput: on_change,
                                for code in langs() {
                                    option { key: "{code}", value: "{code}", "{code}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
