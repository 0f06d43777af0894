//! # Generated documents — lesson notes, lesson plans and assessments
//!
//! The three document resources share one shape and differ only in their REST
//! collection, so they are modelled as a single [`GeneratedDocument`] tagged by
//! [`DocumentKind`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::wire;
use super::Message;

/// Which document collection a record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Note,
    Plan,
    Assessment,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [DocumentKind::Note, DocumentKind::Plan, DocumentKind::Assessment];

    /// REST collection path.
    pub fn path(&self) -> &'static str {
        match self {
            DocumentKind::Note => "/LessonNotes",
            DocumentKind::Plan => "/LessonPlans",
            DocumentKind::Assessment => "/Assessments",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Note => "Lesson note",
            DocumentKind::Plan => "Lesson plan",
            DocumentKind::Assessment => "Assessment",
        }
    }

    /// Route slug used by the dashboard (`/dashboard/generate/{slug}`).
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentKind::Note => "notes",
            DocumentKind::Plan => "plans",
            DocumentKind::Assessment => "assessments",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }
}

/// A generated lesson note / plan / assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default, rename = "class", alias = "className")]
    pub class_name: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "generatedContent", alias = "lessonNote", alias = "body")]
    pub content: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl GeneratedDocument {
    /// `"Mathematics: Algebra"`, or whichever part is present.
    pub fn title(&self) -> String {
        match (self.subject.trim(), self.topic.trim()) {
            ("", "") => "Untitled".to_string(),
            (s, "") => s.to_string(),
            ("", t) => t.to_string(),
            (s, t) => format!("{s}: {t}"),
        }
    }

    /// Lesson date, accepting both `2024-01-01` and `2024-01-01T00:00:00`.
    pub fn lesson_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Metadata pairs shown above exported content.
    pub fn metadata(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("Subject".to_string(), self.subject.clone()),
            ("Topic".to_string(), self.topic.clone()),
            ("Class".to_string(), self.class_name.clone()),
        ];
        if let Some(duration) = &self.duration {
            pairs.push(("Duration".to_string(), duration.clone()));
        }
        if let Some(date) = self.lesson_date() {
            pairs.push(("Date".to_string(), date.format("%d %B %Y").to_string()));
        }
        pairs.retain(|(_, v)| !v.trim().is_empty());
        pairs
    }
}

/// Body of `POST /{collection}/generate`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub subject: String,
    pub topic: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub duration: String,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_document() {
        let doc: GeneratedDocument = serde_json::from_value(json!({
            "id": 88,
            "subject": "Mathematics",
            "topic": "Algebra",
            "className": "JSS 1",
            "duration": "40 minutes",
            "date": "2024-01-01T00:00:00",
            "generatedContent": "# Objectives"
        }))
        .unwrap();
        assert_eq!(doc.id, "88");
        assert_eq!(doc.class_name, "JSS 1");
        assert_eq!(doc.content, "# Objectives");
        assert_eq!(doc.title(), "Mathematics: Algebra");
        assert_eq!(doc.lesson_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(doc.messages.is_empty());
    }

    #[test]
    fn test_metadata_skips_blank_fields() {
        let doc: GeneratedDocument = serde_json::from_value(json!({
            "id": "x",
            "subject": "Biology",
            "class": "SS 2"
        }))
        .unwrap();
        let meta = doc.metadata();
        assert_eq!(
            meta,
            vec![
                ("Subject".to_string(), "Biology".to_string()),
                ("Class".to_string(), "SS 2".to_string()),
            ]
        );
        assert_eq!(doc.title(), "Biology");
    }

    #[test]
    fn test_generate_request_body() {
        let body = GenerateRequest {
            subject: "Mathematics".into(),
            topic: "Algebra".into(),
            class_name: "JSS 1".into(),
            duration: "40 minutes".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "subject": "Mathematics",
                "topic": "Algebra",
                "class": "JSS 1",
                "duration": "40 minutes",
                "date": "2024-01-01"
            })
        );
    }

    #[test]
    fn test_kind_slugs() {
        for kind in DocumentKind::ALL {
            assert_eq!(DocumentKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(DocumentKind::from_slug("users"), None);
    }
}
