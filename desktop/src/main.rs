#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use api::Backend;
#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::Shell;

#[cfg(feature = "desktop")]
fn main() {
    dioxus::logger::init(Level::INFO).ok();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("FingerFit Stats – v{}", env!("CARGO_PKG_VERSION")))
                    .with_maximized(true),
            ),
        )
        .launch(App);
}

#[cfg(not(feature = "desktop"))]
fn main() {
    dioxus::logger::init(Level::INFO).ok();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    use_context_provider(Backend::from_env);
    // AppHeader updates this on language selection.
    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    rsx! {
        // Theme is always inlined; no asset directory ships with the binary.
        document::Style { "{ui::THEME_CSS}" }

        div { key: "{lang_code()}", class: "app-root",
            Shell {}
        }
    }
}
