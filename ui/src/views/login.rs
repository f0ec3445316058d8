use api::{AuthError, Backend, IdentityService};
use dioxus::prelude::*;

use crate::t;

/// Localized text for a sign-in failure.
fn auth_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidEmail => t!("auth-invalid-email"),
        AuthError::UserDisabled => t!("auth-user-disabled"),
        AuthError::UserNotFound => t!("auth-user-not-found"),
        AuthError::WrongPassword => t!("auth-wrong-password"),
        AuthError::InvalidCredential => t!("auth-invalid-credential"),
        AuthError::TooManyRequests => t!("auth-too-many-requests"),
        AuthError::Network(_) => t!("auth-network"),
        AuthError::Other(_) => t!("auth-generic"),
    }
}

#[component]
pub fn LoginScreen() -> Element {
    let backend = use_context::<Backend>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| None::<AuthError>);
    let _lang = try_use_context::<Signal<String>>().map(|code| code());

    let demo_hint = backend
        .demo_credentials()
        .map(|(email, password)| t!("login-demo-hint", email = email, password = password));

    let on_submit = {
        let backend = backend.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if pending() {
                return;
            }
            let backend = backend.clone();
            let address = email().trim().to_string();
            let secret = password();
            error.set(None);
            pending.set(true);

            spawn(async move {
                match backend.sign_in(&address, &secret).await {
                    // The session listener swaps this screen out.
                    Ok(user) => tracing::info!(uid = %user.uid, "signed in"),
                    Err(err) => {
                        tracing::warn!(code = err.code(), %err, "sign-in failed");
                        error.set(Some(err));
                        pending.set(false);
                    }
                }
            });
        }
    };

    let submit_label = if pending() {
        t!("login-pending")
    } else {
        t!("login-submit")
    };
    let error_text = error.read().as_ref().map(auth_message);

    rsx! {
        main { class: "login-screen", id: "loginScreen",
            form { class: "login-card", id: "loginForm", onsubmit: on_submit,
                h1 { class: "login-card__title", {t!("login-title")} }
                p { class: "login-card__subtitle", {t!("login-subtitle")} }

                label { class: "field",
                    span { class: "field__label", {t!("login-email")} }
                    input {
                        id: "email",
                        r#type: "email",
                        autocomplete: "username",
                        required: true,
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { class: "field__label", {t!("login-password")} }
                    input {
                        id: "password",
                        r#type: "password",
                        autocomplete: "current-password",
                        required: true,
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }

                if let Some(message) = error_text {
                    p { class: "login-card__error show", id: "loginError", role: "alert", "{message}" }
                }

                button {
                    class: "btn btn--primary",
                    id: "loginBtn",
                    r#type: "submit",
                    disabled: pending(),
                    "{submit_label}"
                }

                if let Some(hint) = demo_hint {
                    p { class: "login-card__hint", "{hint}" }
                }
            }
        }
    }
}
