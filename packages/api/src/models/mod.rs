//! Data models exchanged with the REST backend.

mod auth;
mod document;
mod message;
mod taxonomy;
mod user;
pub(crate) mod wire;

pub use auth::{AuthToken, ResetPasswordRequest, SignUpRequest};
pub use document::{DocumentKind, GenerateRequest, GeneratedDocument};
pub use message::{Message, MessageRole};
pub use taxonomy::{ClassInfo, NameRequest, SubjectInfo, TopicInfo};
pub use user::{PlanTier, Role, RoleUpdate, UserInfo};
