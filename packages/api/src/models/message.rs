//! Thread messages attached to a generated document.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::wire;

/// Author of a thread message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl<'de> Deserialize<'de> for MessageRole {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let role = match Value::deserialize(d)? {
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "system" => MessageRole::System,
                "user" | "human" => MessageRole::User,
                _ => MessageRole::Assistant,
            },
            Value::Number(n) => match n.as_i64() {
                Some(0) => MessageRole::System,
                Some(1) => MessageRole::User,
                _ => MessageRole::Assistant,
            },
            _ => MessageRole::Assistant,
        };
        Ok(role)
    }
}

/// One entry in a document's thread. Ordered by creation; append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub id: Option<String>,
    pub role: MessageRole,
    #[serde(alias = "text", alias = "message")]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: None,
            role,
            content: content.into(),
            created_at: None,
        }
    }
}
