//! UI Components
//!
//! Reusable Leptos components.

mod confirm_dialog;
mod delete_confirm_button;
mod package_drawer;
mod pagination_bar;
mod sidebar;
mod status_badge;
mod toast_host;

pub use confirm_dialog::ConfirmDialog;
pub use delete_confirm_button::DeleteConfirmButton;
pub use package_drawer::PackageDrawer;
pub use pagination_bar::PaginationBar;
pub use sidebar::Sidebar;
pub use status_badge::StatusBadge;
pub use toast_host::ToastHost;
