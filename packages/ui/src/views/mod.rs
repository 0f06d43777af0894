mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod landing;
pub use landing::LandingView;

mod dashboard;
pub use dashboard::{generate_path, generation_requirement, nav_items, DashboardHome, DashboardShell, NavItem};

mod resource_list;
pub use resource_list::ResourceListView;

mod generate_form;
pub use generate_form::GenerateFormView;

mod document_detail;
pub use document_detail::DocumentDetailView;
