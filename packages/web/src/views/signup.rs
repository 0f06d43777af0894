//! Account registration. On success the address is remembered for the
//! verification page.

use api::SignUpRequest;
use dioxus::prelude::*;
use store::{keys, KeyValueStore};
use ui::{api_client, log_activity, use_activity_log, use_auth, use_config, LogLevel};

use super::use_guest_redirect;
use crate::Route;

#[component]
pub fn SignUp() -> Element {
    use_guest_redirect();

    let config = use_config();
    let auth = use_auth();
    let nav = use_navigator();
    let mut activity_log = use_activity_log();

    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut school = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let request = SignUpRequest {
            first_name: first_name().trim().to_string(),
            last_name: last_name().trim().to_string(),
            email: email().trim().to_string(),
            password: password(),
            confirm_password: confirm(),
            school_name: Some(school().trim().to_string()).filter(|s| !s.is_empty()),
        };
        if let Err(message) = request.validate() {
            error.set(Some(message));
            return;
        }
        busy.set(true);
        error.set(None);
        let client = api_client(&config, &auth);
        spawn(async move {
            let result = client.sign_up(&request).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    store::make_store().set(keys::EMAIL, &request.email);
                    log_activity(&mut activity_log, LogLevel::Success, &format!("Account created for {}", request.email));
                    nav.push(Route::VerifyEmail {});
                }
                Err(err) => {
                    tracing::warn!("sign-up failed: {err}");
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
                h1 { "Create your account" }

                TextField { label: "First name", value: first_name(), on_input: move |v: String| first_name.set(v) }
                TextField { label: "Last name", value: last_name(), on_input: move |v: String| last_name.set(v) }
                TextField { label: "Email", input_type: "email", value: email(), on_input: move |v: String| email.set(v) }
                TextField { label: "School (optional)", value: school(), on_input: move |v: String| school.set(v) }
                TextField { label: "Password", input_type: "password", value: password(), on_input: move |v: String| password.set(v) }
                TextField { label: "Confirm password", input_type: "password", value: confirm(), on_input: move |v: String| confirm.set(v) }

                if let Some(message) = error() {
                    p { class: "alert alert-error", "{message}" }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Creating account…" } else { "Sign up" }
                }

                div {
                    class: "auth-links",
                    span { class: "muted", "Already registered?" }
                    Link { to: Route::SignIn {}, "Sign in" }
                }
            }
        }
    }
}

#[component]
pub(crate) fn TextField(
    label: String,
    value: String,
    #[props(default = "text".to_string())] input_type: String,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            class: "field",
            span { "{label}" }
            input {
                class: "input",
                r#type: "{input_type}",
                value: "{value}",
                oninput: move |evt: FormEvent| on_input.call(evt.value()),
            }
        }
    }
}
