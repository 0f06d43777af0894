use api::{PageRequest, ResourceKind, Role, RoleUpdate};
use dioxus::prelude::*;
use serde_json::Value;

use crate::auth::{api_client, sign_out, use_auth, use_config};
use crate::icons::FaTrashCan;
use crate::name_form::NameForm;
use crate::resource_list::{DeleteFollowUp, ListState};
use crate::rows::{columns, fetch_rows, Row};
use crate::{log_activity, use_activity_log, Icon, LogLevel};

use super::{ConfirmDialog, ModalOverlay};

const PAGE_SIZES: [u32; 4] = [5, 10, 25, 50];

/// Paginated, searchable table of one collection with confirmed delete.
///
/// Taxonomy collections also get create / rename, users get a role picker and
/// documents link to their detail view through `on_open`.
#[component]
pub fn ResourceListView(
    kind: ResourceKind,
    /// Called with the row id when a document row is opened.
    #[props(default)]
    on_open: EventHandler<String>,
    /// The "Generate" button of document lists.
    #[props(default)]
    on_create: EventHandler<()>,
) -> Element {
    let config = use_config();
    let auth = use_auth();
    let nav = use_navigator();
    let mut activity_log = use_activity_log();
    let page_size = config.list.default_page_size;

    // Reset list state when the route switches collection
    let mut kind_signal = use_signal(|| kind);
    let mut list = use_signal(|| ListState::<Row>::new(page_size));
    let mut request = use_signal(|| PageRequest::new(1, page_size));
    if *kind_signal.peek() != kind {
        kind_signal.set(kind);
        list.write().reset(page_size);
        request.set(PageRequest::new(1, page_size));
    }

    let mut pending_delete = use_signal(|| Option::<Row>::None);
    let mut deleting = use_signal(|| false);
    let mut name_form = use_signal(|| Option::<NameForm>::None);

    let loader_config = config.clone();
    let mut loader = use_resource(move || {
        let kind = kind_signal();
        let req = request();
        let client = api_client(&loader_config, &auth);
        let epoch = list.peek().epoch();
        async move {
            list.write().begin_load();
            let result = fetch_rows(&client, kind, req).await;
            if !list.peek().is_current(epoch) {
                return;
            }
            match result {
                Ok(page) => list.write().apply_page(page),
                Err(err) if err.is_unauthorized() => {
                    sign_out(auth);
                    nav.replace("/signin");
                }
                Err(err) => {
                    log_activity(
                        &mut activity_log,
                        LogLevel::Error,
                        &format!("Loading {} failed: {err}", kind.title().to_lowercase()),
                    );
                    list.write().apply_error(err.user_message());
                }
            }
        }
    });

    let delete_config = config.clone();
    let confirm_delete = move |_| {
        let Some(row) = pending_delete() else {
            return;
        };
        let client = api_client(&delete_config, &auth);
        let epoch = list.peek().epoch();
        spawn(async move {
            deleting.set(true);
            let result = client.delete(kind, row.id()).await;
            deleting.set(false);
            pending_delete.set(None);
            match result {
                Ok(()) => {
                    log_activity(&mut activity_log, LogLevel::Success, &format!("Deleted {}", row.label()));
                    if !list.peek().is_current(epoch) {
                        return;
                    }
                    let follow_up = list.write().after_delete();
                    match follow_up {
                        DeleteFollowUp::LoadPage(_) => request.set(list.peek().request()),
                        DeleteFollowUp::Reload(_) => loader.restart(),
                    }
                }
                Err(err) => {
                    log_activity(&mut activity_log, LogLevel::Error, &format!("Delete failed: {err}"));
                    if list.peek().is_current(epoch) {
                        list.write().error = Some(err.user_message());
                    }
                }
            }
        });
    };

    let save_config = config.clone();
    let save_name = move |_| {
        let Some(request_body) = name_form.write().as_mut().and_then(NameForm::begin_save) else {
            return;
        };
        let Some(form) = name_form() else {
            return;
        };
        let client = api_client(&save_config, &auth);
        let epoch = list.peek().epoch();
        spawn(async move {
            let result = match &form.id {
                Some(id) => client.update::<Value, _>(kind, id, &request_body).await,
                None => client.create::<Value, _>(kind, &request_body).await,
            };
            match result {
                Ok(_) => {
                    let verb = if form.is_edit() { "Renamed" } else { "Created" };
                    log_activity(&mut activity_log, LogLevel::Success, &format!("{verb} {}", request_body.name));
                    name_form.set(None);
                    if list.peek().is_current(epoch) {
                        loader.restart();
                    }
                }
                Err(err) => {
                    if let Some(form) = name_form.write().as_mut() {
                        form.save_failed(err.user_message());
                    }
                }
            }
        });
    };

    let role_config = config.clone();
    let change_role = use_callback(move |(id, role): (String, Role)| {
        let client = api_client(&role_config, &auth);
        let epoch = list.peek().epoch();
        spawn(async move {
            let result = client.update::<Value, _>(ResourceKind::Users, &id, &RoleUpdate { role }).await;
            match result {
                Ok(_) => log_activity(&mut activity_log, LogLevel::Success, &format!("Role changed to {}", role.label())),
                Err(ref err) => log_activity(&mut activity_log, LogLevel::Error, &format!("Role change failed: {err}")),
            }
            if !list.peek().is_current(epoch) {
                return;
            }
            match result {
                Ok(_) => loader.restart(),
                Err(err) => list.write().error = Some(err.user_message()),
            }
        });
    });

    let state = list();
    let rows: Vec<Row> = state.visible_rows().into_iter().cloned().collect();
    let headers = columns(kind);
    let is_documents = kind.document_kind().is_some();

    rsx! {
        section {
            class: "resource-list",
            header {
                class: "resource-list-header",
                h1 { "{kind.title()}" }
                div {
                    class: "resource-list-actions",
                    input {
                        class: "input search",
                        r#type: "search",
                        placeholder: "Search this page…",
                        value: "{state.search}",
                        oninput: move |evt: FormEvent| list.write().set_search(evt.value()),
                    }
                    if kind.is_taxonomy() {
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| name_form.set(Some(NameForm::create(kind))),
                            "New"
                        }
                    }
                    if is_documents {
                        button {
                            class: "btn btn-primary",
                            onclick: move |_| on_create.call(()),
                            "Generate"
                        }
                    }
                }
            }

            if let Some(error) = state.error.clone() {
                div {
                    class: "alert alert-error",
                    span { "{error}" }
                    button {
                        class: "btn btn-outline btn-sm",
                        onclick: move |_| {
                            list.write().retry();
                            loader.restart();
                        },
                        "Retry"
                    }
                }
            }

            div {
                class: "table-wrap",
                table {
                    class: "table",
                    thead {
                        tr {
                            for header in headers.iter() {
                                th { "{header}" }
                            }
                            th { class: "table-actions", "" }
                        }
                    }
                    tbody {
                        if state.loading && state.items.is_empty() {
                            tr { td { colspan: "{headers.len() + 1}", class: "table-empty", "Loading…" } }
                        } else if rows.is_empty() {
                            tr { td { colspan: "{headers.len() + 1}", class: "table-empty", "Nothing to show." } }
                        }
                        for row in rows {
                            ResourceRow {
                                key: "{row.id()}",
                                row: row.clone(),
                                clickable: is_documents,
                                on_open: on_open,
                                on_edit: move |row: Row| name_form.set(Some(NameForm::edit(kind, &row))),
                                on_delete: move |row: Row| pending_delete.set(Some(row)),
                                on_role: change_role,
                                editable: kind.is_taxonomy(),
                            }
                        }
                    }
                }
            }

            footer {
                class: "pager",
                span { class: "pager-range", "{state.range_label()}" }
                label {
                    class: "pager-size",
                    "Rows per page "
                    select {
                        value: "{state.page_size}",
                        onchange: move |evt: FormEvent| {
                            if let Ok(size) = evt.value().parse::<u32>() {
                                let next = list.write().set_page_size(size);
                                request.set(next);
                            }
                        },
                        for size in PAGE_SIZES {
                            option { value: "{size}", selected: size == state.page_size, "{size}" }
                        }
                    }
                }
                div {
                    class: "pager-nav",
                    button {
                        class: "btn btn-outline btn-sm",
                        disabled: !state.has_prev() || state.loading,
                        onclick: move |_| {
                            let next = list.write().prev();
                            request.set(next);
                        },
                        "Previous"
                    }
                    span { "Page {state.page} of {state.total_pages.max(1)}" }
                    button {
                        class: "btn btn-outline btn-sm",
                        disabled: !state.has_next() || state.loading,
                        onclick: move |_| {
                            let next = list.write().next();
                            request.set(next);
                        },
                        "Next"
                    }
                }
            }
        }

        if let Some(row) = pending_delete() {
            ConfirmDialog {
                title: "Delete {row.label()}?",
                message: "This cannot be undone.",
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }

        if let Some(form) = name_form() {
            ModalOverlay {
                on_close: move |_| name_form.set(None),
                NameFormBody {
                    form: form.clone(),
                    on_change: move |form: NameForm| name_form.set(Some(form)),
                    on_save: save_name,
                    on_cancel: move |_| name_form.set(None),
                }
            }
        }
    }
}

#[component]
fn ResourceRow(
    row: Row,
    clickable: bool,
    editable: bool,
    on_open: EventHandler<String>,
    on_edit: EventHandler<Row>,
    on_delete: EventHandler<Row>,
    on_role: EventHandler<(String, Role)>,
) -> Element {
    let id = row.id().to_string();
    let cells = row.cells();
    let user_role = match &row {
        Row::User(u) => Some(u.role),
        _ => None,
    };
    let open_id = id.clone();
    let edit_row = row.clone();
    let delete_row = row.clone();

    rsx! {
        tr {
            class: if clickable { "row-link" } else { "" },
            onclick: move |_| {
                if clickable {
                    on_open.call(open_id.clone());
                }
            },
            for cell in cells {
                td { "{cell}" }
            }
            td {
                class: "table-actions",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                if let Some(role) = user_role {
                    select {
                        class: "input input-sm",
                        value: "{role.code()}",
                        onchange: move |evt: FormEvent| {
                            if let Ok(code) = evt.value().parse::<i64>() {
                                on_role.call((id.clone(), Role::from_code(code)));
                            }
                        },
                        for option_role in [Role::Regular, Role::Staff, Role::Admin] {
                            option {
                                value: "{option_role.code()}",
                                selected: option_role == role,
                                "{option_role.label()}"
                            }
                        }
                    }
                }
                if editable {
                    button {
                        class: "btn btn-ghost btn-sm",
                        onclick: move |_| on_edit.call(edit_row.clone()),
                        "Rename"
                    }
                }
                button {
                    class: "btn btn-ghost btn-sm btn-danger-text",
                    title: "Delete",
                    onclick: move |_| on_delete.call(delete_row.clone()),
                    Icon { icon: FaTrashCan, width: 14, height: 14 }
                }
            }
        }
    }
}

#[component]
fn NameFormBody(
    form: NameForm,
    on_change: EventHandler<NameForm>,
    on_save: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let config = use_config();
    let auth = use_auth();
    let parent_kind = form.parent_kind();

    // Parent options: classes for a subject, subjects for a topic
    let parents = use_resource(move || {
        let client = api_client(&config, &auth);
        async move {
            let Some(parent_kind) = parent_kind else {
                return Vec::new();
            };
            match fetch_rows(&client, parent_kind, PageRequest::new(1, 100)).await {
                Ok(page) => page.items,
                Err(err) => {
                    tracing::warn!("loading {parent_kind:?} options failed: {err}");
                    Vec::new()
                }
            }
        }
    });
    let options: Vec<Row> = parents.cloned().unwrap_or_default();

    let name_form = form.clone();
    let parent_form = form.clone();

    rsx! {
        form {
            class: "modal-body",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_save.call(());
            },
            h2 { class: "modal-title", "{form.title()}" }
            label {
                class: "field",
                span { "Name" }
                input {
                    class: "input",
                    r#type: "text",
                    value: "{form.name}",
                    autofocus: true,
                    oninput: move |evt: FormEvent| {
                        let mut next = name_form.clone();
                        next.name = evt.value();
                        on_change.call(next);
                    },
                }
            }
            if let Some(parent_kind) = parent_kind {
                label {
                    class: "field",
                    span { if parent_kind == ResourceKind::Classes { "Class" } else { "Subject" } }
                    select {
                        class: "input",
                        value: "{form.parent_id}",
                        onchange: move |evt: FormEvent| {
                            let mut next = parent_form.clone();
                            next.parent_id = evt.value();
                            on_change.call(next);
                        },
                        option { value: "", "Choose…" }
                        for parent in options {
                            option {
                                value: "{parent.id()}",
                                selected: parent.id() == form.parent_id,
                                "{parent.label()}"
                            }
                        }
                    }
                }
            }
            if let Some(error) = &form.error {
                p { class: "field-error", "{error}" }
            }
            div {
                class: "modal-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: form.saving,
                    if form.saving { "Saving…" } else { "Save" }
                }
                button {
                    class: "btn btn-outline",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}
