use api::DocumentKind;
use dioxus::prelude::*;

use crate::auth::{api_client, use_auth, use_config};
use crate::generation::{FormPhase, GenerationForm};
use crate::{log_activity, use_activity_log, LogLevel};

/// Form that asks the AI service for a new note, plan or assessment.
///
/// On success `on_generated` receives the detail route of the new document.
#[component]
pub fn GenerateFormView(kind: DocumentKind, on_generated: EventHandler<String>) -> Element {
    let config = use_config();
    let auth = use_auth();
    let mut activity_log = use_activity_log();

    let mut form = use_signal(|| GenerationForm::new(kind));
    if form.peek().kind != kind {
        form.set(GenerationForm::new(kind));
    }

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(request) = form.write().begin_submit() else {
            return;
        };
        let client = api_client(&config, &auth);
        spawn(async move {
            log_activity(
                &mut activity_log,
                LogLevel::Info,
                &format!("Generating {} for {}", kind.label().to_lowercase(), request.topic),
            );
            let result = client
                .generate(kind, &request)
                .await
                .map(|doc| doc.id)
                .map_err(|err| err.user_message());
            let failed = result.as_ref().err().cloned();
            let path = form.write().finish_submit(result);
            match (path, failed) {
                (Some(path), _) => {
                    log_activity(&mut activity_log, LogLevel::Success, &format!("{} generated", kind.label()));
                    on_generated.call(path);
                }
                (None, Some(message)) => {
                    log_activity(&mut activity_log, LogLevel::Error, &format!("Generation failed: {message}"));
                }
                (None, None) => {}
            }
        });
    };

    let state = form();
    let busy = state.is_submitting();

    rsx! {
        section {
            class: "generate",
            h1 { "New {kind.label().to_lowercase()}" }
            p { class: "muted", "Fill in the lesson details and the assistant will draft it for you." }

            form {
                class: "card form-grid",
                onsubmit: submit,

                Field {
                    label: "Subject",
                    value: state.subject.clone(),
                    placeholder: "Mathematics",
                    error: state.errors.subject.clone(),
                    on_input: move |v: String| form.write().subject = v,
                }
                Field {
                    label: "Topic",
                    value: state.topic.clone(),
                    placeholder: "Algebra",
                    error: state.errors.topic.clone(),
                    on_input: move |v: String| form.write().topic = v,
                }
                Field {
                    label: "Class",
                    value: state.class_name.clone(),
                    placeholder: "JSS 1",
                    error: state.errors.class_name.clone(),
                    on_input: move |v: String| form.write().class_name = v,
                }
                Field {
                    label: "Duration",
                    value: state.duration.clone(),
                    placeholder: "40 minutes",
                    error: state.errors.duration.clone(),
                    on_input: move |v: String| form.write().duration = v,
                }
                Field {
                    label: "Date",
                    input_type: "date",
                    value: state.date.clone(),
                    error: state.errors.date.clone(),
                    on_input: move |v: String| form.write().date = v,
                }

                if let FormPhase::Failed(message) = &state.phase {
                    p { class: "alert alert-error", "{message}" }
                }

                div {
                    class: "form-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: busy,
                        if busy { "Generating…" } else { "Generate" }
                    }
                }
            }
        }
    }
}

#[component]
fn Field(
    label: String,
    value: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
    #[props(default)] error: Option<String>,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            class: "field",
            span { "{label}" }
            input {
                class: if error.is_some() { "input input-invalid" } else { "input" },
                r#type: "{input_type}",
                value: "{value}",
                placeholder: "{placeholder}",
                oninput: move |evt: FormEvent| on_input.call(evt.value()),
            }
            if let Some(error) = &error {
                span { class: "field-error", "{error}" }
            }
        }
    }
}
