//! Verdaccio Console App
//!
//! Root component: sidebar navigation and the active page.

use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::dashboard::auto_start_on_launch;
use crate::components::{Sidebar, ToastHost};
use crate::context::{AppContext, ColorScheme, Section};
use crate::models::PackageKind;
use crate::notify::Notifier;
use crate::pages::{ConfigPage, DashboardPage, LogsPage, PackagesPage, SettingsPage, UsersPage};

#[component]
pub fn App() -> impl IntoView {
    // State
    let (section, set_section) = signal(Section::default());
    let (scheme, set_scheme) = signal(ColorScheme::restore());

    // Provide context to all children
    let ctx = AppContext::new((section, set_section), (scheme, set_scheme));
    let notifier = Notifier::new();
    provide_context(ctx);
    provide_context(notifier);

    // Launch-time registry start
    spawn_local(async move {
        match auto_start_on_launch(&ctx.api).await {
            Ok(Some(status)) => {
                log!("[App] registry auto-started on port {}", status.port);
                notifier.success(format!("Registry started on port {}", status.port));
            }
            Ok(None) => {}
            Err(e) => {
                warn!("[App] auto-start failed: {}", e);
                notifier.error(format!("Could not start the registry: {}", e));
            }
        }
    });

    view! {
        <div class=move || format!("app-layout scheme-{}", scheme.get().as_str())>
            <Sidebar />
            <main class="main-content">
                {move || match section.get() {
                    Section::Dashboard => view! { <DashboardPage /> }.into_any(),
                    Section::PrivatePackages => view! { <PackagesPage kind=PackageKind::Private /> }.into_any(),
                    Section::CachedPackages => view! { <PackagesPage kind=PackageKind::Cached /> }.into_any(),
                    Section::Users => view! { <UsersPage /> }.into_any(),
                    Section::Logs => view! { <LogsPage /> }.into_any(),
                    Section::Config => view! { <ConfigPage /> }.into_any(),
                    Section::Settings => view! { <SettingsPage /> }.into_any(),
                }}
            </main>
            <ToastHost />
        </div>
    }
}
