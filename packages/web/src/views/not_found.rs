use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "auth-page",
            div {
                class: "card auth-card",
                h1 { "Page not found" }
                p { class: "muted", "Nothing lives at /{path}." }
                Link { to: Route::Landing {}, "Go home" }
            }
        }
    }
}
