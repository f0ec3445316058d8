use std::{cell::Cell, rc::Rc};

use api::{Backend, IdentityService, SessionSubscription};
use dioxus::prelude::*;

use crate::components::AppHeader;
use crate::i18n;

use super::{DashboardScreen, LoginScreen};

/// Root of the app. Tracks the signed-in user and switches between the login
/// form and the dashboard. Expects a [`Backend`] in context.
#[component]
pub fn Shell() -> Element {
    i18n::init();

    let backend = use_context::<Backend>();
    let session = use_signal(|| backend.current_user());
    let subscription = use_hook(|| Rc::new(Cell::new(None::<SessionSubscription>)));

    use_effect({
        let backend = backend.clone();
        let subscription = subscription.clone();
        move || {
            if subscription.get().is_some() {
                return;
            }
            let id = backend.on_session_change(move |user| {
                let mut session = session;
                session.set(user);
            });
            subscription.set(Some(id));
        }
    });

    use_drop({
        let backend = backend.clone();
        move || {
            if let Some(id) = subscription.take() {
                backend.unsubscribe(id);
            }
        }
    });

    match session() {
        Some(user) => rsx! {
            DashboardScreen { user }
        },
        None => rsx! {
            AppHeader {}
            LoginScreen {}
        },
    }
}
