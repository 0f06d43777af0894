//! Collection screens. Documents open their detail view; the rest are edited
//! in place.

use api::{DocumentKind, ResourceKind};
use dioxus::prelude::*;
use ui::views::ResourceListView;

use crate::Route;

#[component]
fn DocumentList(kind: DocumentKind) -> Element {
    let nav = use_navigator();
    rsx! {
        ResourceListView {
            kind: ResourceKind::from(kind),
            on_open: move |id: String| {
                nav.push(Route::detail(kind, id));
            },
            on_create: move |_| {
                nav.push(Route::Generate { slug: kind.slug().to_string() });
            },
        }
    }
}

#[component]
pub fn Notes() -> Element {
    rsx! { DocumentList { kind: DocumentKind::Note } }
}

#[component]
pub fn Plans() -> Element {
    rsx! { DocumentList { kind: DocumentKind::Plan } }
}

#[component]
pub fn Assessments() -> Element {
    rsx! { DocumentList { kind: DocumentKind::Assessment } }
}

#[component]
pub fn Classes() -> Element {
    rsx! { ResourceListView { kind: ResourceKind::Classes } }
}

#[component]
pub fn Subjects() -> Element {
    rsx! { ResourceListView { kind: ResourceKind::Subjects } }
}

#[component]
pub fn Topics() -> Element {
    rsx! { ResourceListView { kind: ResourceKind::Topics } }
}

#[component]
pub fn Users() -> Element {
    rsx! { ResourceListView { kind: ResourceKind::Users } }
}
