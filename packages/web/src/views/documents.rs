use api::DocumentKind;
use dioxus::prelude::*;
use ui::views::{DocumentDetailView, GenerateFormView};

use crate::Route;

#[component]
pub fn Generate(slug: String) -> Element {
    let nav = use_navigator();
    let Some(kind) = DocumentKind::from_slug(&slug) else {
        nav.replace(Route::Dashboard {});
        return rsx! {};
    };

    rsx! {
        GenerateFormView {
            kind,
            on_generated: move |path: String| match path.parse::<Route>() {
                Ok(route) => {
                    nav.push(route);
                }
                Err(err) => tracing::error!("no route for {path}: {err}"),
            },
        }
    }
}

#[component]
pub fn NoteDetail(id: String) -> Element {
    rsx! { DocumentDetailView { kind: DocumentKind::Note, id } }
}

#[component]
pub fn PlanDetail(id: String) -> Element {
    rsx! { DocumentDetailView { kind: DocumentKind::Plan, id } }
}

#[component]
pub fn AssessmentDetail(id: String) -> Element {
    rsx! { DocumentDetailView { kind: DocumentKind::Assessment, id } }
}
