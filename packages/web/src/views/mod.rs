use dioxus::prelude::*;
use ui::{evaluate, home_path, use_auth, GuardDecision, Requirement};

mod signin;
pub use signin::SignIn;

mod signup;
pub use signup::SignUp;

mod verify_email;
pub use verify_email::VerifyEmail;

mod password;
pub use password::{ForgotPassword, ResetPassword};

mod dashboard_layout;
pub use dashboard_layout::{Dashboard, DashboardLayout};

mod lists;
pub use lists::{Assessments, Classes, Notes, Plans, Subjects, Topics, Users};

mod documents;
pub use documents::{AssessmentDetail, Generate, NoteDetail, PlanDetail};

mod not_found;
pub use not_found::NotFound;

/// Send signed-in visitors of the auth pages to their home route.
pub(crate) fn use_guest_redirect() {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth();
    if evaluate(Requirement::Guest, state.signed_in(), state.user.as_ref()) == GuardDecision::RedirectDashboard {
        if let Some(user) = &state.user {
            nav.replace(home_path(user));
        }
    }
}
