use api::{DocumentKind, PlanTier, Role, UserInfo};
use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::guard::{evaluate, GuardDecision, Requirement};
use crate::icons::{FaBookOpen, FaLock};
use crate::{ActivityLogPanel, ActivityLogToggle, Icon};

#[derive(Clone, Debug, PartialEq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

const ALL_ITEMS: &[(&str, &str, Requirement)] = &[
    ("Overview", "/dashboard", Requirement::Verified),
    ("Lesson notes", "/dashboard/notes", Requirement::Verified),
    ("Lesson plans", "/dashboard/plans", Requirement::Plan(PlanTier::Basic)),
    ("Assessments", "/dashboard/assessments", Requirement::Plan(PlanTier::Basic)),
    ("Classes", "/dashboard/classes", Requirement::Verified),
    ("Subjects", "/dashboard/subjects", Requirement::Verified),
    ("Topics", "/dashboard/topics", Requirement::Verified),
    ("Users", "/dashboard/users", Requirement::Admin),
];

/// Sidebar entries the user is allowed to open.
pub fn nav_items(user: &UserInfo) -> Vec<NavItem> {
    ALL_ITEMS
        .iter()
        .filter(|(_, _, requirement)| evaluate(*requirement, true, Some(user)) == GuardDecision::Allow)
        .map(|&(label, path, _)| NavItem { label, path })
        .collect()
}

/// What generating a document of this kind requires.
pub fn generation_requirement(kind: DocumentKind) -> Requirement {
    match kind {
        DocumentKind::Note => Requirement::Verified,
        DocumentKind::Plan | DocumentKind::Assessment => Requirement::Plan(PlanTier::Basic),
    }
}

/// Route of the generation form for a document kind.
pub fn generate_path(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Note => "/dashboard/generate/notes",
        DocumentKind::Plan => "/dashboard/generate/plans",
        DocumentKind::Assessment => "/dashboard/generate/assessments",
    }
}

/// Dashboard chrome: sidebar navigation, user badge, activity log.
///
/// `active` is the current path; the matching entry is highlighted.
#[component]
pub fn DashboardShell(active: String, children: Element) -> Element {
    let auth = use_auth();
    let user = auth().user;
    let items = user.as_ref().map(nav_items).unwrap_or_default();

    rsx! {
        div {
            class: "dashboard",
            aside {
                class: "dashboard-sidebar",
                Link {
                    class: "brand",
                    to: "/",
                    Icon { icon: FaBookOpen, width: 18, height: 18 }
                    span { "LessonPilot" }
                }
                nav {
                    for item in items {
                        Link {
                            class: if active == item.path { "nav-link active" } else { "nav-link" },
                            to: item.path,
                            "{item.label}"
                        }
                    }
                }
                if let Some(user) = &user {
                    div {
                        class: "user-badge",
                        span { class: "user-name", "{user.display_name()}" }
                        span { class: "muted", "{user.role.label()} · {user.plan.label()}" }
                    }
                }
                LogoutButton { class: "btn btn-ghost" }
            }
            main {
                class: "dashboard-main",
                div {
                    class: "dashboard-toolbar",
                    ActivityLogToggle {}
                }
                {children}
            }
            ActivityLogPanel {}
        }
    }
}

/// `/dashboard` landing: shortcuts to generation and the user's lists.
#[component]
pub fn DashboardHome() -> Element {
    let auth = use_auth();
    let Some(user) = auth().user else {
        return rsx! {};
    };

    rsx! {
        section {
            class: "overview",
            h1 { "Welcome, {user.display_name()}" }
            p { class: "muted", "You are on the {user.plan.label()} plan." }

            div {
                class: "overview-grid",
                for kind in DocumentKind::ALL {
                    if evaluate(generation_requirement(kind), true, Some(&user)) == GuardDecision::Allow {
                        Link {
                            class: "card overview-card",
                            to: generate_path(kind),
                            h3 { "New {kind.label().to_lowercase()}" }
                            p { class: "muted", "Draft one with the assistant" }
                        }
                    } else {
                        div {
                            class: "card overview-card locked",
                            h3 {
                                Icon { icon: FaLock, width: 14, height: 14 }
                                " {kind.label()}"
                            }
                            p { class: "muted", "Available on the Basic and Premium plans" }
                        }
                    }
                }
            }

            if user.role == Role::Admin {
                p {
                    Link { to: "/dashboard/users", "Manage users" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, plan: PlanTier) -> UserInfo {
        UserInfo {
            id: "1".into(),
            email: "t@school.ng".into(),
            first_name: None,
            last_name: None,
            role,
            plan,
            is_verified: true,
            school_name: None,
        }
    }

    fn paths(user: &UserInfo) -> Vec<&'static str> {
        nav_items(user).into_iter().map(|i| i.path).collect()
    }

    #[test]
    fn test_free_teacher_navigation() {
        let paths = paths(&user(Role::Regular, PlanTier::Free));
        assert!(paths.contains(&"/dashboard/notes"));
        assert!(!paths.contains(&"/dashboard/plans"));
        assert!(!paths.contains(&"/dashboard/users"));
    }

    #[test]
    fn test_paid_teacher_sees_plans() {
        let paths = paths(&user(Role::Regular, PlanTier::Basic));
        assert!(paths.contains(&"/dashboard/plans"));
        assert!(paths.contains(&"/dashboard/assessments"));
        assert!(!paths.contains(&"/dashboard/users"));
    }

    #[test]
    fn test_admin_sees_everything() {
        assert_eq!(paths(&user(Role::Admin, PlanTier::Free)).len(), ALL_ITEMS.len());
    }

    #[test]
    fn test_generate_path_matches_slug() {
        for kind in DocumentKind::ALL {
            assert_eq!(generate_path(kind), format!("/dashboard/generate/{}", kind.slug()));
        }
    }

    #[test]
    fn test_generation_requirements() {
        assert_eq!(generation_requirement(DocumentKind::Note), Requirement::Verified);
        assert_eq!(
            generation_requirement(DocumentKind::Assessment),
            Requirement::Plan(PlanTier::Basic)
        );
    }
}
