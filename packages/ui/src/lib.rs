//! This crate contains all shared UI for the workspace: the dashboard views
//! and the view-model state they drive (route guard, list paging, generation
//! form, chat thread, export formatter, activity log).

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");

mod auth;
pub use auth::{
    api_client, complete_sign_in, refresh_profile, sign_out, use_auth, use_config,
    AuthProvider, AuthState, LogoutButton,
};

pub mod activity_log;
pub use activity_log::{log_activity, use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};

pub mod chat;
pub mod export;
pub mod generation;
pub mod guard;
pub mod markdown;
pub mod name_form;
pub mod resource_list;
pub mod rows;

pub use guard::{evaluate, home_path, GuardDecision, Requirement};
