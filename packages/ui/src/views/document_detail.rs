use api::{DocumentKind, GeneratedDocument, MessageRole};
use dioxus::prelude::*;

use crate::auth::{api_client, sign_out, use_auth, use_config};
use crate::chat::{ChatPhase, ChatState, EntryStatus};
use crate::export::{self, Document, ExportFormat, PageSetup};
use crate::markdown::render_markdown;
use crate::{log_activity, use_activity_log, LogLevel};

/// Detail view of a generated document: the content, its follow-up thread,
/// regeneration and export.
#[component]
pub fn DocumentDetailView(kind: DocumentKind, id: String) -> Element {
    let config = use_config();
    let auth = use_auth();
    let nav = use_navigator();
    let mut activity_log = use_activity_log();

    // Track the id in a signal so the loader re-runs on route param change
    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let mut chat = use_signal(ChatState::new);
    let mut document = use_signal(|| Option::<GeneratedDocument>::None);
    let mut draft = use_signal(String::new);

    let loader_config = config.clone();
    let _loader = use_resource(move || {
        let id = id_signal();
        let client = api_client(&loader_config, &auth);
        async move {
            document.set(None);
            chat.write().seed(&kind.label().to_lowercase());
            let doc = match client.get::<GeneratedDocument>(kind.into(), &id).await {
                Ok(doc) => doc,
                Err(err) if err.is_unauthorized() => {
                    sign_out(auth);
                    nav.replace("/signin");
                    return;
                }
                Err(err) => {
                    log_activity(&mut activity_log, LogLevel::Error, &format!("Loading {id} failed: {err}"));
                    chat.write().load_failed(err.user_message());
                    return;
                }
            };

            let thread = if doc.messages.is_empty() {
                match client.messages(kind, &id).await {
                    Ok(messages) => messages,
                    Err(err) => {
                        tracing::warn!("thread of {id} unavailable: {err}");
                        Vec::new()
                    }
                }
            } else {
                doc.messages.clone()
            };

            let mut state = chat.write();
            state.load_content(&doc.content);
            // The first assistant message usually repeats the generated content
            let skip_first = thread
                .iter()
                .find(|m| m.role == MessageRole::Assistant)
                .is_some_and(|m| m.content.trim() == doc.content.trim());
            let mut skipped = !skip_first;
            state.load_thread(
                thread
                    .into_iter()
                    .filter(|m| {
                        if !skipped && m.role == MessageRole::Assistant {
                            skipped = true;
                            return false;
                        }
                        true
                    })
                    .collect(),
            );
            drop(state);
            document.set(Some(doc));
        }
    });

    let send_config = config.clone();
    let send = use_callback(move |(local_id, text): (u64, String)| {
        let client = api_client(&send_config, &auth);
        let id = id_signal();
        spawn(async move {
            let result = client
                .send_message(kind, &id, &text)
                .await
                .map_err(|err| err.user_message());
            if let Err(message) = &result {
                log_activity(&mut activity_log, LogLevel::Error, &format!("Message not sent: {message}"));
            }
            chat.write().resolve_send(local_id, result);
        });
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let text = draft();
        if let Some(local_id) = chat.write().begin_send(&text) {
            draft.set(String::new());
            send.call((local_id, text));
        }
    };

    let regen_config = config.clone();
    let regenerate = move |_| {
        let Some(generation) = chat.write().begin_regenerate() else {
            return;
        };
        let client = api_client(&regen_config, &auth);
        let id = id_signal();
        spawn(async move {
            log_activity(&mut activity_log, LogLevel::Info, &format!("Regenerating {}", kind.label().to_lowercase()));
            let result = client.regenerate(kind, &id).await.map_err(|err| err.user_message());
            match &result {
                Ok(_) => log_activity(&mut activity_log, LogLevel::Success, "Regenerated"),
                Err(message) => log_activity(&mut activity_log, LogLevel::Error, &format!("Regeneration failed: {message}")),
            }
            chat.write().resolve_regenerate(generation, result);
        });
    };

    let export_config = config.clone();
    let export_as = use_callback(move |format: ExportFormat| {
        let Some(doc) = document() else {
            return;
        };
        let content = chat.peek().transcript().unwrap_or(&doc.content).to_string();
        let model = Document::from_content(doc.title(), doc.metadata(), &content);
        let artifact = export::export(&model, format, &PageSetup::from(&export_config.export));
        match export::save(&artifact) {
            Ok(place) => log_activity(&mut activity_log, LogLevel::Success, &format!("Exported {place}")),
            Err(err) => log_activity(&mut activity_log, LogLevel::Error, &format!("Export failed: {err}")),
        }
    });

    let state = chat();
    let title = document().map(|d| d.title()).unwrap_or_else(|| kind.label().to_string());
    let metadata = document().map(|d| d.metadata()).unwrap_or_default();
    let can_send = state.can_send() && document().is_some();

    rsx! {
        section {
            class: "detail",
            header {
                class: "detail-header",
                div {
                    h1 { "{title}" }
                    if !metadata.is_empty() {
                        dl {
                            class: "meta",
                            for (key, value) in metadata {
                                div {
                                    dt { "{key}" }
                                    dd { "{value}" }
                                }
                            }
                        }
                    }
                }
                div {
                    class: "detail-actions",
                    for format in ExportFormat::ALL {
                        button {
                            class: "btn btn-outline btn-sm",
                            disabled: document().is_none(),
                            onclick: move |_| export_as.call(format),
                            "{format.label()}"
                        }
                    }
                    button {
                        class: "btn btn-primary btn-sm",
                        disabled: !can_send,
                        onclick: regenerate,
                        if state.phase == ChatPhase::Regenerating { "Regenerating…" } else { "Regenerate" }
                    }
                }
            }

            if let Some(error) = state.error.clone() {
                p { class: "alert alert-error", "{error}" }
            }

            div {
                class: "chat",
                if state.phase == ChatPhase::Loading {
                    p { class: "muted", "Loading…" }
                }
                for entry in state.entries.clone() {
                    {match entry.role {
                        MessageRole::System => rsx! {
                            p { key: "{entry.local_id}", class: "chat-system", "{entry.content}" }
                        },
                        MessageRole::Assistant => rsx! {
                            article {
                                key: "{entry.local_id}",
                                class: "chat-bubble assistant",
                                dangerous_inner_html: render_markdown(&entry.content),
                            }
                        },
                        MessageRole::User => rsx! {
                            div {
                                key: "{entry.local_id}",
                                class: match entry.status {
                                    EntryStatus::Failed(_) => "chat-bubble user failed",
                                    EntryStatus::Pending => "chat-bubble user pending",
                                    EntryStatus::Sent => "chat-bubble user",
                                },
                                p { "{entry.content}" }
                                {match entry.status.clone() {
                                    EntryStatus::Pending => rsx! { span { class: "chat-status", "Sending…" } },
                                    EntryStatus::Failed(reason) => rsx! {
                                        div {
                                            class: "chat-status",
                                            span { "Not sent: {reason}" }
                                            button {
                                                class: "btn btn-ghost btn-sm",
                                                disabled: !state.can_send(),
                                                onclick: move |_| {
                                                    let text = chat.write().retry_failed(entry.local_id);
                                                    if let Some(text) = text {
                                                        send.call((entry.local_id, text));
                                                    }
                                                },
                                                "Retry"
                                            }
                                            button {
                                                class: "btn btn-ghost btn-sm",
                                                onclick: move |_| chat.write().discard_failed(entry.local_id),
                                                "Discard"
                                            }
                                        }
                                    },
                                    EntryStatus::Sent => rsx! {},
                                }}
                            }
                        },
                    }}
                }
                if state.phase == ChatPhase::Sending || state.phase == ChatPhase::Regenerating {
                    p { class: "chat-typing", "Assistant is writing…" }
                }
            }

            form {
                class: "chat-input",
                onsubmit: submit,
                textarea {
                    class: "input",
                    rows: "2",
                    placeholder: "Ask a follow-up question…",
                    value: "{draft}",
                    disabled: !can_send,
                    oninput: move |evt: FormEvent| draft.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: !can_send || draft().trim().is_empty(),
                    "Send"
                }
            }
        }
    }
}
