use dioxus::prelude::*;
use ui::views::{DashboardHome, DashboardShell};
use ui::{evaluate, refresh_profile, use_auth, GuardDecision};

use crate::Route;

/// Guarded shell of every `/dashboard` route. The route's requirement is
/// checked here, once per navigation, instead of in each screen.
#[component]
pub fn DashboardLayout() -> Element {
    let route = use_route::<Route>();
    let auth = use_auth();
    let nav = use_navigator();

    let state = auth();
    let decision = evaluate(route.requirement(), state.signed_in(), state.user.as_ref());

    match decision {
        GuardDecision::Allow => rsx! {
            DashboardShell {
                active: route.to_string(),
                Outlet::<Route> {}
            }
        },
        GuardDecision::Wait => match state.error {
            Some(message) if !state.loading => rsx! {
                div {
                    class: "auth-page",
                    div {
                        class: "card auth-card",
                        p { class: "alert alert-error", "{message}" }
                        button { class: "btn btn-primary", onclick: move |_| refresh_profile(), "Retry" }
                    }
                }
            },
            _ => rsx! {
                div { class: "auth-page", p { class: "muted", "Loading…" } }
            },
        },
        GuardDecision::RedirectSignIn => {
            tracing::info!(route = %route, "not signed in");
            nav.replace(Route::SignIn {});
            rsx! {}
        }
        GuardDecision::RedirectVerify => {
            nav.replace(Route::VerifyEmail {});
            rsx! {}
        }
        GuardDecision::RedirectDashboard => {
            tracing::info!(route = %route, "not allowed for this account");
            nav.replace(Route::Dashboard {});
            rsx! {}
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { DashboardHome {} }
}
