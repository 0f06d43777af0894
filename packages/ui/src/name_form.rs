//! Create / rename form for classes, subjects and topics.

use api::{NameRequest, ResourceKind};

use crate::rows::Row;

#[derive(Clone, Debug, PartialEq)]
pub struct NameForm {
    pub kind: ResourceKind,
    /// `None` when creating.
    pub id: Option<String>,
    pub name: String,
    /// Class of a subject, subject of a topic.
    pub parent_id: String,
    pub error: Option<String>,
    pub saving: bool,
}

impl NameForm {
    pub fn create(kind: ResourceKind) -> Self {
        Self {
            kind,
            id: None,
            name: String::new(),
            parent_id: String::new(),
            error: None,
            saving: false,
        }
    }

    pub fn edit(kind: ResourceKind, row: &Row) -> Self {
        let parent_id = match row {
            Row::Subject(s) => s.class_id.clone(),
            Row::Topic(t) => t.subject_id.clone(),
            _ => None,
        };
        Self {
            id: Some(row.id().to_string()),
            name: row.name().unwrap_or_default().to_string(),
            parent_id: parent_id.unwrap_or_default(),
            ..Self::create(kind)
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Collection the parent is picked from.
    pub fn parent_kind(&self) -> Option<ResourceKind> {
        match self.kind {
            ResourceKind::Subjects => Some(ResourceKind::Classes),
            ResourceKind::Topics => Some(ResourceKind::Subjects),
            _ => None,
        }
    }

    pub fn title(&self) -> String {
        let noun = match self.kind {
            ResourceKind::Classes => "class",
            ResourceKind::Subjects => "subject",
            ResourceKind::Topics => "topic",
            other => other.title(),
        };
        if self.is_edit() {
            format!("Rename {noun}")
        } else {
            format!("New {noun}")
        }
    }

    /// Validate and build the request body.
    pub fn request(&self) -> Result<NameRequest, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        let parent = Some(self.parent_id.trim().to_string()).filter(|p| !p.is_empty());
        match self.kind {
            ResourceKind::Subjects if parent.is_none() && !self.is_edit() => Err("Choose a class".to_string()),
            ResourceKind::Topics if parent.is_none() && !self.is_edit() => Err("Choose a subject".to_string()),
            ResourceKind::Subjects => Ok(NameRequest::subject(&self.name, parent)),
            ResourceKind::Topics => Ok(NameRequest::topic(&self.name, parent)),
            _ => Ok(NameRequest::class(&self.name)),
        }
    }

    /// Validate and mark the form as saving.
    pub fn begin_save(&mut self) -> Option<NameRequest> {
        if self.saving {
            return None;
        }
        match self.request() {
            Ok(request) => {
                self.error = None;
                self.saving = true;
                Some(request)
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    pub fn save_failed(&mut self, message: String) {
        self.saving = false;
        self.error = Some(message);
    }
}
