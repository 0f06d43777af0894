//! Email / password sign-in.

use dioxus::prelude::*;
use ui::{api_client, complete_sign_in, home_path, log_activity, use_activity_log, use_auth, use_config, LogLevel};

use super::use_guest_redirect;
use crate::Route;

#[component]
pub fn SignIn() -> Element {
    use_guest_redirect();

    let config = use_config();
    let auth = use_auth();
    let nav = use_navigator();
    let mut activity_log = use_activity_log();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let address = email().trim().to_string();
        if address.is_empty() || password().is_empty() {
            error.set(Some("Enter your email and password".to_string()));
            return;
        }
        busy.set(true);
        error.set(None);
        let config = config.clone();
        let client = api_client(&config, &auth);
        spawn(async move {
            let result = match client.login(&address, &password()).await {
                Ok(token) => complete_sign_in(&config, auth, token).await,
                Err(err) => Err(err),
            };
            busy.set(false);
            match result {
                Ok(user) => {
                    log_activity(&mut activity_log, LogLevel::Success, &format!("Signed in as {}", user.email));
                    nav.replace(home_path(&user));
                }
                Err(err) => {
                    tracing::warn!("sign-in failed: {err}");
                    error.set(Some(err.user_message()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "card auth-card",
                onsubmit: submit,
                h1 { "Sign in" }
                p { class: "muted", "Welcome back to LessonPilot." }

                label {
                    class: "field",
                    span { "Email" }
                    input {
                        class: "input",
                        r#type: "email",
                        autocomplete: "email",
                        value: "{email}",
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                label {
                    class: "field",
                    span { "Password" }
                    input {
                        class: "input",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }

                if let Some(message) = error() {
                    p { class: "alert alert-error", "{message}" }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Signing in…" } else { "Sign in" }
                }

                div {
                    class: "auth-links",
                    Link { to: Route::ForgotPassword {}, "Forgot password?" }
                    Link { to: Route::SignUp {}, "Create an account" }
                }
            }
        }
    }
}
