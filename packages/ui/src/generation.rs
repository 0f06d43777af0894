//! Generation form state: field values, validation and the submit phase.

use api::{DocumentKind, GenerateRequest};
use chrono::NaiveDate;

/// Per-field validation messages, shown next to the inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors {
    pub subject: Option<String>,
    pub topic: Option<String>,
    pub class_name: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.topic.is_none()
            && self.class_name.is_none()
            && self.duration.is_none()
            && self.date.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    /// Generation succeeded; holds the detail route to navigate to.
    Done(String),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationForm {
    pub kind: DocumentKind,
    pub subject: String,
    pub topic: String,
    pub class_name: String,
    pub duration: String,
    /// `YYYY-MM-DD`, as produced by `<input type="date">`.
    pub date: String,
    pub errors: FieldErrors,
    pub phase: FormPhase,
}

fn required(value: &str, label: &str) -> Option<String> {
    value.trim().is_empty().then(|| format!("{label} is required"))
}

impl GenerationForm {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            subject: String::new(),
            topic: String::new(),
            class_name: String::new(),
            duration: String::new(),
            date: String::new(),
            errors: FieldErrors::default(),
            phase: FormPhase::Idle,
        }
    }

    /// Check every field and build the request body.
    pub fn validate(&self) -> Result<GenerateRequest, FieldErrors> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d");
        let errors = FieldErrors {
            subject: required(&self.subject, "Subject"),
            topic: required(&self.topic, "Topic"),
            class_name: required(&self.class_name, "Class"),
            duration: required(&self.duration, "Duration"),
            date: match (&date, self.date.trim().is_empty()) {
                (_, true) => Some("Date is required".to_string()),
                (Err(_), false) => Some("Enter the date as YYYY-MM-DD".to_string()),
                (Ok(_), false) => None,
            },
        };

        match date {
            Ok(date) if errors.is_empty() => Ok(GenerateRequest {
                subject: self.subject.trim().to_string(),
                topic: self.topic.trim().to_string(),
                class_name: self.class_name.trim().to_string(),
                duration: self.duration.trim().to_string(),
                date,
            }),
            _ => Err(errors),
        }
    }

    /// Validate and enter `Submitting`. Returns `None` while a submission is
    /// already in flight or when a field is invalid.
    pub fn begin_submit(&mut self) -> Option<GenerateRequest> {
        if self.is_submitting() {
            return None;
        }
        match self.validate() {
            Ok(request) => {
                self.errors = FieldErrors::default();
                self.phase = FormPhase::Submitting;
                Some(request)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Record the server's answer. On success returns the route of the new
    /// document's detail view.
    pub fn finish_submit(&mut self, result: Result<String, String>) -> Option<String> {
        match result {
            Ok(id) => {
                let path = detail_path(self.kind, &id);
                self.phase = FormPhase::Done(path.clone());
                Some(path)
            }
            Err(message) => {
                self.phase = FormPhase::Failed(message);
                None
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }
}

/// Route of a document's detail / chat view.
pub fn detail_path(kind: DocumentKind, id: &str) -> String {
    match kind {
        DocumentKind::Note => format!("/detail/{id}"),
        DocumentKind::Plan => format!("/plans/detail/{id}"),
        DocumentKind::Assessment => format!("/assessments/detail/{id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> GenerationForm {
        GenerationForm {
            subject: "Mathematics".into(),
            topic: "Algebra".into(),
            class_name: "JSS 1".into(),
            duration: "40 minutes".into(),
            date: "2024-01-01".into(),
            ..GenerationForm::new(DocumentKind::Note)
        }
    }

    #[test]
    fn test_complete_form_navigates_to_detail() {
        let mut form = filled();
        let request = form.begin_submit().unwrap();
        assert_eq!(request.subject, "Mathematics");
        assert_eq!(request.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(form.is_submitting());

        let path = form.finish_submit(Ok("314".to_string()));
        assert_eq!(path.as_deref(), Some("/detail/314"));
        assert_eq!(form.phase, FormPhase::Done("/detail/314".to_string()));
    }

    #[test]
    fn test_double_submit_is_refused() {
        let mut form = filled();
        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let mut form = GenerationForm::new(DocumentKind::Plan);
        form.subject = "Mathematics".into();
        form.date = "01/01/2024".into();

        assert!(form.begin_submit().is_none());
        assert_eq!(form.phase, FormPhase::Idle);
        assert!(form.errors.subject.is_none());
        assert_eq!(form.errors.topic.as_deref(), Some("Topic is required"));
        assert_eq!(form.errors.class_name.as_deref(), Some("Class is required"));
        assert_eq!(form.errors.duration.as_deref(), Some("Duration is required"));
        assert_eq!(form.errors.date.as_deref(), Some("Enter the date as YYYY-MM-DD"));
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let mut form = filled();
        form.topic = "   ".into();
        let errors = form.validate().unwrap_err();
        assert!(errors.topic.is_some());
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_failure_allows_resubmit() {
        let mut form = filled();
        form.begin_submit();
        assert!(form.finish_submit(Err("Generation service unavailable".into())).is_none());
        assert_eq!(form.phase, FormPhase::Failed("Generation service unavailable".into()));
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn test_detail_paths() {
        assert_eq!(detail_path(DocumentKind::Note, "1"), "/detail/1");
        assert_eq!(detail_path(DocumentKind::Plan, "2"), "/plans/detail/2");
        assert_eq!(detail_path(DocumentKind::Assessment, "3"), "/assessments/detail/3");
    }
}
