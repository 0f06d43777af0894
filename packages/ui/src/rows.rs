//! Table rows for the resource list screens.
//!
//! Lists dispatch on [`ResourceKind`] at runtime, so every collection is
//! decoded into one [`Row`] enum that knows its columns and search fields.

use api::{
    ApiClient, ApiError, ClassInfo, GeneratedDocument, Page, PageRequest, ResourceKind, SubjectInfo,
    TopicInfo, UserInfo,
};

use crate::resource_list::Searchable;

#[derive(Clone, Debug, PartialEq)]
pub enum Row {
    Document(GeneratedDocument),
    Class(ClassInfo),
    Subject(SubjectInfo),
    Topic(TopicInfo),
    User(UserInfo),
}

/// Column headers of a list screen.
pub fn columns(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Notes | ResourceKind::Plans | ResourceKind::Assessments => {
            &["Subject", "Topic", "Class", "Date"]
        }
        ResourceKind::Classes => &["Name", "Created by"],
        ResourceKind::Subjects => &["Name", "Class"],
        ResourceKind::Topics => &["Name", "Subject"],
        ResourceKind::Users => &["Name", "Email", "Role", "Plan"],
    }
}

fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "—".to_string(),
    }
}

impl Row {
    pub fn id(&self) -> &str {
        match self {
            Row::Document(d) => &d.id,
            Row::Class(c) => &c.id,
            Row::Subject(s) => &s.id,
            Row::Topic(t) => &t.id,
            Row::User(u) => &u.id,
        }
    }

    /// Name shown in dialogs ("Delete JSS 1?").
    pub fn label(&self) -> String {
        match self {
            Row::Document(d) => d.title(),
            Row::Class(c) => c.name.clone(),
            Row::Subject(s) => s.name.clone(),
            Row::Topic(t) => t.name.clone(),
            Row::User(u) => u.display_name(),
        }
    }

    /// The editable name of a taxonomy row.
    pub fn name(&self) -> Option<&str> {
        match self {
            Row::Class(c) => Some(&c.name),
            Row::Subject(s) => Some(&s.name),
            Row::Topic(t) => Some(&t.name),
            _ => None,
        }
    }

    /// Cell texts in [`columns`] order.
    pub fn cells(&self) -> Vec<String> {
        match self {
            Row::Document(d) => vec![
                d.subject.clone(),
                d.topic.clone(),
                d.class_name.clone(),
                d.lesson_date()
                    .map(|date| date.format("%d %b %Y").to_string())
                    .unwrap_or_else(|| "—".to_string()),
            ],
            Row::Class(c) => vec![c.name.clone(), or_dash(c.created_by.as_deref())],
            Row::Subject(s) => vec![s.name.clone(), or_dash(s.class_name.as_deref())],
            Row::Topic(t) => vec![t.name.clone(), or_dash(t.subject_name.as_deref())],
            Row::User(u) => vec![
                u.display_name(),
                u.email.clone(),
                u.role.label().to_string(),
                u.plan.label().to_string(),
            ],
        }
    }
}

impl Searchable for Row {
    fn search_fields(&self) -> Vec<&str> {
        match self {
            Row::Document(d) => vec![d.subject.as_str(), d.topic.as_str(), d.class_name.as_str()],
            Row::Class(c) => vec![c.name.as_str()],
            Row::Subject(s) => vec![Some(s.name.as_str()), s.class_name.as_deref()].into_iter().flatten().collect(),
            Row::Topic(t) => vec![Some(t.name.as_str()), t.subject_name.as_deref()].into_iter().flatten().collect(),
            Row::User(u) => [
                Some(u.email.as_str()),
                u.first_name.as_deref(),
                u.last_name.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect(),
        }
    }
}

/// Fetch one page of `kind`, decoded into rows.
pub async fn fetch_rows(client: &ApiClient, kind: ResourceKind, request: PageRequest) -> Result<Page<Row>, ApiError> {
    Ok(match kind {
        ResourceKind::Notes | ResourceKind::Plans | ResourceKind::Assessments => client
            .list::<GeneratedDocument>(kind, request)
            .await?
            .map(Row::Document),
        ResourceKind::Classes => client.list::<ClassInfo>(kind, request).await?.map(Row::Class),
        ResourceKind::Subjects => client.list::<SubjectInfo>(kind, request).await?.map(Row::Subject),
        ResourceKind::Topics => client.list::<TopicInfo>(kind, request).await?.map(Row::Topic),
        ResourceKind::Users => client.list::<UserInfo>(kind, request).await?.map(Row::User),
    })
}
