use api::Backend;
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::Shell;

fn main() {
    dioxus::logger::init(Level::INFO).ok();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    use_context_provider(Backend::from_env);
    // Shared language code; the header writes it on selection.
    let lang_code = use_signal(ui::i18n::current_language);
    use_context_provider(|| lang_code);

    rsx! {
        document::Title { "FingerFit Stats" }
        document::Style { "{ui::THEME_CSS}" }

        // Keyed by language so the whole tree remounts with the new bundle.
        div { key: "{lang_code()}", class: "app-root",
            Shell {}
        }
    }
}
