//! # API crate — typed REST client for the LessonPilot backend
//!
//! The web client never talks to the backend except through this crate. It
//! replaces per-screen `fetch` calls with one [`ApiClient`] and one decoding
//! layer for the backend's inconsistent response envelopes.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: auth, resource CRUD, generation and thread endpoints with bearer auth |
//! | [`error`] | [`ApiError`] and inline user messages |
//! | [`models`] | DTOs: users, taxonomy, generated documents, messages, auth bodies |
//! | [`page`] | [`PageRequest`] / [`Page`] and envelope normalisation |
//! | [`resource`] | [`ResourceKind`]: the REST collections and their paths |

pub mod client;
pub mod error;
pub mod models;
pub mod page;
pub mod resource;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{
    AuthToken, ClassInfo, DocumentKind, GenerateRequest, GeneratedDocument, Message, MessageRole,
    NameRequest, PlanTier, ResetPasswordRequest, Role, RoleUpdate, SignUpRequest, SubjectInfo,
    TopicInfo, UserInfo,
};
pub use page::{total_pages, Page, PageRequest};
pub use resource::ResourceKind;

pub use store::ClientConfig;
