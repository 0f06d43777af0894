//! Class → subject → topic taxonomy.

use serde::{Deserialize, Serialize};

use super::wire;

/// A class (e.g. "JSS 1").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(alias = "className")]
    pub name: String,
    #[serde(default, alias = "createdByName")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A subject taught in a class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectInfo {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(alias = "subjectName")]
    pub name: String,
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub class_id: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default, alias = "createdByName")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A topic within a subject. Topic names are unique per subject (server-enforced).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicInfo {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(alias = "topicName")]
    pub name: String,
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default, alias = "createdByName")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create / rename body shared by the taxonomy endpoints.
///
/// `parent_id` is sent as `classId` for subjects and `subjectId` for topics.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NameRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
}

impl NameRequest {
    pub fn class(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            class_id: None,
            subject_id: None,
        }
    }

    pub fn subject(name: &str, class_id: Option<String>) -> Self {
        Self {
            class_id,
            ..Self::class(name)
        }
    }

    pub fn topic(name: &str, subject_id: Option<String>) -> Self {
        Self {
            subject_id,
            ..Self::class(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_taxonomy() {
        let class: ClassInfo = serde_json::from_value(json!({ "id": 1, "className": "JSS 1" })).unwrap();
        assert_eq!(class.name, "JSS 1");

        let topic: TopicInfo = serde_json::from_value(json!({
            "id": "t9",
            "topicName": "Algebra",
            "subjectId": 4,
            "subjectName": "Mathematics"
        }))
        .unwrap();
        assert_eq!(topic.subject_id.as_deref(), Some("4"));
        assert_eq!(topic.subject_name.as_deref(), Some("Mathematics"));
    }

    #[test]
    fn test_name_request_bodies() {
        assert_eq!(
            serde_json::to_value(NameRequest::class("  JSS 2 ")).unwrap(),
            json!({ "name": "JSS 2" })
        );
        assert_eq!(
            serde_json::to_value(NameRequest::subject("Biology", Some("3".into()))).unwrap(),
            json!({ "name": "Biology", "classId": "3" })
        );
        assert_eq!(
            serde_json::to_value(NameRequest::topic("Cells", Some("8".into()))).unwrap(),
            json!({ "name": "Cells", "subjectId": "8" })
        );
    }
}
