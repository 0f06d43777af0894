use api::{DocumentKind, PlanTier};
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::views::{generation_requirement, LandingView};
use ui::{AuthProvider, Requirement, VIEWS_CSS};
use views::{
    AssessmentDetail, Assessments, Classes, Dashboard, DashboardLayout, ForgotPassword, Generate,
    NotFound, NoteDetail, Notes, PlanDetail, Plans, ResetPassword, SignIn, SignUp, Subjects, Topics,
    Users, VerifyEmail,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", LandingView)]
    Landing {},
    #[route("/signin")]
    SignIn {},
    #[route("/signup")]
    SignUp {},
    #[route("/verify-email")]
    VerifyEmail {},
    #[route("/forgot-password")]
    ForgotPassword {},
    #[route("/reset-password?:email&:token")]
    ResetPassword { email: String, token: String },

    #[layout(DashboardLayout)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/dashboard/notes")]
        Notes {},
        #[route("/dashboard/plans")]
        Plans {},
        #[route("/dashboard/assessments")]
        Assessments {},
        #[route("/dashboard/classes")]
        Classes {},
        #[route("/dashboard/subjects")]
        Subjects {},
        #[route("/dashboard/topics")]
        Topics {},
        #[route("/dashboard/users")]
        Users {},
        #[route("/dashboard/generate/:slug")]
        Generate { slug: String },
        #[route("/detail/:id")]
        NoteDetail { id: String },
        #[route("/plans/detail/:id")]
        PlanDetail { id: String },
        #[route("/assessments/detail/:id")]
        AssessmentDetail { id: String },
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// What the current user needs to open this route.
    pub fn requirement(&self) -> Requirement {
        match self {
            Route::Landing {} | Route::VerifyEmail {} | Route::NotFound { .. } => Requirement::Public,
            Route::SignIn {}
            | Route::SignUp {}
            | Route::ForgotPassword {}
            | Route::ResetPassword { .. } => Requirement::Guest,
            Route::Dashboard {}
            | Route::Notes {}
            | Route::Classes {}
            | Route::Subjects {}
            | Route::Topics {}
            | Route::NoteDetail { .. } => Requirement::Verified,
            Route::Plans {}
            | Route::Assessments {}
            | Route::PlanDetail { .. }
            | Route::AssessmentDetail { .. } => Requirement::Plan(PlanTier::Basic),
            Route::Users {} => Requirement::Admin,
            Route::Generate { slug } => DocumentKind::from_slug(slug)
                .map(generation_requirement)
                .unwrap_or(Requirement::Verified),
        }
    }

    pub fn detail(kind: DocumentKind, id: String) -> Self {
        match kind {
            DocumentKind::Note => Route::NoteDetail { id },
            DocumentKind::Plan => Route::PlanDetail { id },
            DocumentKind::Assessment => Route::AssessmentDetail { id },
        }
    }
}

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialised: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Stylesheet { href: VIEWS_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}
