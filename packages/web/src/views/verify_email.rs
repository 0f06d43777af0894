//! Email verification with the code sent after sign-up.

use dioxus::prelude::*;
use store::{keys, KeyValueStore};
use ui::{api_client, log_activity, refresh_profile, use_activity_log, use_auth, use_config, LogLevel};

use super::signup::TextField;
use crate::Route;

#[component]
pub fn VerifyEmail() -> Element {
    let config = use_config();
    let auth = use_auth();
    let nav = use_navigator();
    let mut activity_log = use_activity_log();

    // The signed-in profile wins over the address remembered at sign-up
    let mut email = use_signal(move || {
        auth.peek()
            .user
            .as_ref()
            .map(|u| u.email.clone())
            .or_else(|| store::make_store().get(keys::EMAIL))
            .unwrap_or_default()
    });
    let mut code = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let verify_config = config.clone();
    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let address = email().trim().to_string();
        let entered = code().trim().to_string();
        if address.is_empty() || entered.is_empty() {
            error.set(Some("Enter your email and the code we sent you".to_string()));
            return;
        }
        busy.set(true);
        error.set(None);
        let client = api_client(&verify_config, &auth);
        spawn(async move {
            let result = client.verify_email(&address, &entered).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    log_activity(&mut activity_log, LogLevel::Success, &format!("Verified {address}"));
                    if auth.peek().signed_in() {
                        refresh_profile();
                        nav.replace(Route::Dashboard {});
                    } else {
                        nav.replace(Route::SignIn {});
                    }
                }
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    };

    let resend = move |_| {
        let address = email().trim().to_string();
        if address.is_empty() {
            error.set(Some("Enter your email first".to_string()));
            return;
        }
        let client = api_client(&config, &auth);
        spawn(async move {
            match client.resend_verification(&address).await {
                Ok(()) => {
                    error.set(None);
                    notice.set(Some(format!("A new code was sent to {address}")));
                }
                Err(err) => {
                    log_activity(&mut activity_log, LogLevel::Warning, &format!("Resend failed: {err}"));
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
                h1 { "Verify your email" }
                p { class: "muted", "We sent a verification code to your inbox." }

                TextField { label: "Email", input_type: "email", value: email(), on_input: move |v: String| email.set(v) }
                TextField { label: "Verification code", value: code(), on_input: move |v: String| code.set(v) }

                if let Some(message) = notice() {
                    p { class: "notice", "{message}" }
                }
                if let Some(message) = error() {
                    p { class: "alert alert-error", "{message}" }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Verifying…" } else { "Verify" }
                }
                div {
                    class: "auth-links",
                    button { class: "btn btn-ghost btn-sm", r#type: "button", onclick: resend, "Resend code" }
                    Link { to: Route::SignIn {}, "Back to sign in" }
                }
            }
        }
    }
}
