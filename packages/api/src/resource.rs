//! REST collections exposed by the backend.

use crate::models::DocumentKind;

/// A server-owned collection with the standard list / get / create / update /
/// delete endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Notes,
    Plans,
    Assessments,
    Classes,
    Subjects,
    Topics,
    Users,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Notes,
        ResourceKind::Plans,
        ResourceKind::Assessments,
        ResourceKind::Classes,
        ResourceKind::Subjects,
        ResourceKind::Topics,
        ResourceKind::Users,
    ];

    /// Collection path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Notes => DocumentKind::Note.path(),
            ResourceKind::Plans => DocumentKind::Plan.path(),
            ResourceKind::Assessments => DocumentKind::Assessment.path(),
            ResourceKind::Classes => "/Class",
            ResourceKind::Subjects => "/Subjects",
            ResourceKind::Topics => "/Topics",
            ResourceKind::Users => "/Users",
        }
    }

    /// Plural title for list screens.
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Notes => "Lesson notes",
            ResourceKind::Plans => "Lesson plans",
            ResourceKind::Assessments => "Assessments",
            ResourceKind::Classes => "Classes",
            ResourceKind::Subjects => "Subjects",
            ResourceKind::Topics => "Topics",
            ResourceKind::Users => "Users",
        }
    }

    /// The document collection behind this resource, if it is one.
    pub fn document_kind(&self) -> Option<DocumentKind> {
        match self {
            ResourceKind::Notes => Some(DocumentKind::Note),
            ResourceKind::Plans => Some(DocumentKind::Plan),
            ResourceKind::Assessments => Some(DocumentKind::Assessment),
            _ => None,
        }
    }

    /// Classes, subjects and topics are edited through a single name field.
    pub fn is_taxonomy(&self) -> bool {
        matches!(
            self,
            ResourceKind::Classes | ResourceKind::Subjects | ResourceKind::Topics
        )
    }
}

impl From<DocumentKind> for ResourceKind {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Note => ResourceKind::Notes,
            DocumentKind::Plan => ResourceKind::Plans,
            DocumentKind::Assessment => ResourceKind::Assessments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(ResourceKind::Notes.path(), "/LessonNotes");
        assert_eq!(ResourceKind::Classes.path(), "/Class");
        assert_eq!(ResourceKind::Assessments.path(), "/Assessments");
    }

    #[test]
    fn test_document_kind_roundtrip() {
        for kind in DocumentKind::ALL {
            assert_eq!(ResourceKind::from(kind).document_kind(), Some(kind));
        }
        assert!(ResourceKind::Users.document_kind().is_none());
        assert!(ResourceKind::Topics.is_taxonomy());
        assert!(!ResourceKind::Notes.is_taxonomy());
    }
}
