//! Forgotten password request and the reset form reached from the email link.

use api::ResetPasswordRequest;
use dioxus::prelude::*;
use ui::{api_client, log_activity, use_activity_log, use_auth, use_config, LogLevel};

use super::signup::TextField;
use super::use_guest_redirect;
use crate::Route;

#[component]
pub fn ForgotPassword() -> Element {
    use_guest_redirect();

    let config = use_config();
    let auth = use_auth();

    let mut email = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut sent = use_signal(|| false);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let address = email().trim().to_string();
        if address.is_empty() || busy() {
            return;
        }
        busy.set(true);
        error.set(None);
        let client = api_client(&config, &auth);
        spawn(async move {
            let result = client.forgot_password(&address).await;
            busy.set(false);
            match result {
                Ok(()) => sent.set(true),
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "card auth-card",
                onsubmit: submit,
                h1 { "Reset your password" }
                if sent() {
                    p { class: "notice", "If an account exists for {email}, a reset link is on its way." }
                } else {
                    TextField { label: "Email", input_type: "email", value: email(), on_input: move |v: String| email.set(v) }
                    if let Some(message) = error() {
                        p { class: "alert alert-error", "{message}" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: busy(),
                        if busy() { "Sending…" } else { "Send reset link" }
                    }
                }
                div {
                    class: "auth-links",
                    Link { to: Route::SignIn {}, "Back to sign in" }
                }
            }
        }
    }
}

#[component]
pub fn ResetPassword(email: String, token: String) -> Element {
    use_guest_redirect();

    let config = use_config();
    let auth = use_auth();
    let nav = use_navigator();
    let mut activity_log = use_activity_log();

    let mut address = use_signal(|| email.clone());
    let mut code = use_signal(|| token.clone());
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        if password().len() < 8 {
            error.set(Some("Password must be at least 8 characters".to_string()));
            return;
        }
        if password() != confirm() {
            error.set(Some("Passwords do not match".to_string()));
            return;
        }
        let request = ResetPasswordRequest {
            email: address().trim().to_string(),
            token: code().trim().to_string(),
            new_password: password(),
        };
        if request.email.is_empty() || request.token.is_empty() {
            error.set(Some("The reset link is incomplete".to_string()));
            return;
        }
        busy.set(true);
        error.set(None);
        let client = api_client(&config, &auth);
        spawn(async move {
            let result = client.reset_password(&request).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    log_activity(&mut activity_log, LogLevel::Success, "Password reset");
                    nav.replace(Route::SignIn {});
                }
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "card auth-card",
                onsubmit: submit,
                h1 { "Choose a new password" }
                TextField { label: "Email", input_type: "email", value: address(), on_input: move |v: String| address.set(v) }
                if token.is_empty() {
                    TextField { label: "Reset code", value: code(), on_input: move |v: String| code.set(v) }
                }
                TextField { label: "New password", input_type: "password", value: password(), on_input: move |v: String| password.set(v) }
                TextField { label: "Confirm password", input_type: "password", value: confirm(), on_input: move |v: String| confirm.set(v) }
                if let Some(message) = error() {
                    p { class: "alert alert-error", "{message}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Saving…" } else { "Reset password" }
                }
            }
        }
    }
}
