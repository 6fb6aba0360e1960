//! Pages
//!
//! One component per sidebar section.

mod config_editor;
mod dashboard;
mod logs;
mod packages;
mod settings;
mod users;

pub use config_editor::ConfigPage;
pub use dashboard::DashboardPage;
pub use logs::LogsPage;
pub use packages::PackagesPage;
pub use settings::SettingsPage;
pub use users::UsersPage;
