use dioxus::prelude::*;

use crate::activity_log::{use_activity_log, LogLevel};
use crate::icons::FaListUl;
use crate::Icon;

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/styling/activity_log.css");

/// Slide-over list of recent activity, newest first, with a switch to show
/// only warnings and errors.
#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();
    let mut problems_only = use_signal(|| false);

    let state = log();
    if !state.visible {
        return rsx! {};
    }
    let entries: Vec<_> = state.recent(problems_only()).into_iter().cloned().collect();

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        aside {
            class: "activity-log-panel",
            header {
                class: "activity-log-header",
                span { "Activity" }
                div {
                    class: "activity-log-header-actions",
                    label {
                        class: "activity-log-filter",
                        input {
                            r#type: "checkbox",
                            checked: problems_only(),
                            onchange: move |evt: FormEvent| problems_only.set(evt.checked()),
                        }
                        " Problems ({state.problem_count()})"
                    }
                    button { onclick: move |_| log.write().clear(), "Clear" }
                    button { onclick: move |_| log.write().visible = false, "Close" }
                }
            }
            ol {
                class: "activity-log-entries",
                if entries.is_empty() {
                    li { class: "activity-log-empty", "Nothing yet." }
                }
                for entry in entries {
                    li {
                        class: if entry.level == LogLevel::Error { "activity-log-entry error" } else { "activity-log-entry" },
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        span { class: "activity-log-level {entry.level.label()}", "{entry.level.label()}" }
                        span { "{entry.message}" }
                    }
                }
            }
        }
    }
}

/// Toolbar button opening the panel. Turns red once something failed.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let state = log();
    let problems = state.problem_count();

    rsx! {
        button {
            class: if state.has_errors() { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            title: "Activity",
            onclick: move |_| {
                let mut log = log.write();
                log.visible = !log.visible;
            },
            Icon { icon: FaListUl, width: 12, height: 12 }
            if problems > 0 { " {problems}" }
        }
    }
}
