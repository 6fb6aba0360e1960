//! Dashboard Page
//!
//! Server status, start/stop and package/user counts, refreshed every few seconds.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::dashboard::{refresh_overview, start_server, stop_server, Overview};
use crate::components::StatusBadge;
use crate::context::{use_app_context, Section};
use crate::notify::use_notifier;
use crate::poller::{poll, ActionGuard, DASHBOARD_INTERVAL};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();
    let guard = ActionGuard::new();
    let overview = RwSignal::new(Overview::default());
    let (loaded, set_loaded) = signal(false);
    let (installed, set_installed) = signal::<Option<bool>>(None);
    let (version, set_version) = signal::<Option<String>>(None);

    // Last good overview stays on screen when a refresh fails
    let refresh = move || {
        spawn_local(async move {
            match refresh_overview(&ctx.api, &guard).await {
                Ok(Some(next)) => {
                    overview.try_set(next);
                    set_loaded.try_set(true);
                }
                Ok(None) => {}
                Err(e) => warn!("[Dashboard] refresh failed: {}", e),
            }
        });
    };

    refresh();
    spawn_local(async move {
        let is_installed = ctx.api.check_verdaccio_installed().await.unwrap_or(false);
        set_installed.try_set(Some(is_installed));
        if is_installed {
            if let Ok(v) = ctx.api.get_verdaccio_version().await {
                set_version.try_set(Some(v));
            }
        }
    });
    poll(DASHBOARD_INTERVAL, guard, refresh);

    let on_start = move |_| {
        let (port, allow_lan) = overview.get_untracked().launch_params();
        spawn_local(async move {
            match start_server(&ctx.api, &guard, port, allow_lan).await {
                Ok(next) => {
                    notifier.success(format!("Registry started on port {}", next.status.port));
                    overview.try_set(next);
                    set_loaded.try_set(true);
                }
                Err(e) => notifier.error(e.message()),
            }
        });
    };

    let on_stop = move |_| {
        spawn_local(async move {
            match stop_server(&ctx.api, &guard).await {
                Ok(next) => {
                    notifier.info("Registry stopped");
                    overview.try_set(next);
                    set_loaded.try_set(true);
                }
                Err(e) => notifier.error(e.message()),
            }
        });
    };

    let on_open_storage = move |_| {
        spawn_local(async move {
            if let Err(e) = ctx.api.open_storage_dir().await {
                notifier.error(e.message());
            }
        });
    };

    let running = Signal::derive(move || overview.with(|o| o.status.running));
    let busy = guard.busy();
    let count_text = |count: Option<usize>| count.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string());

    view! {
        <section class="page dashboard">
            <header class="page-header">
                <h1>"Dashboard"</h1>
                <StatusBadge running=running />
            </header>

            <Show when=move || installed.get() == Some(false)>
                <div class="banner warning">
                    "Verdaccio was not found in the app resources. Starting the registry will fail until it is installed."
                </div>
            </Show>

            <div class="card server-card">
                <div class="server-summary">
                    <div>
                        <div class="muted">"Registry URL"</div>
                        <div class="registry-url">
                            {move || format!("http://localhost:{}", overview.with(|o| o.port))}
                        </div>
                    </div>
                    <div>
                        <div class="muted">"PID"</div>
                        <div>{move || overview.with(|o| o.status.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()))}</div>
                    </div>
                    <div>
                        <div class="muted">"Version"</div>
                        <div>{move || version.get().unwrap_or_else(|| "-".to_string())}</div>
                    </div>
                </div>
                <div class="server-actions">
                    {move || if running.get() {
                        view! {
                            <button class="btn btn-danger" disabled=move || busy.get() on:click=on_stop>
                                {move || if busy.get() { "Stopping…" } else { "Stop" }}
                            </button>
                        }.into_any()
                    } else {
                        view! {
                            <button
                                class="btn btn-primary"
                                disabled=move || busy.get() || !loaded.get()
                                on:click=on_start
                            >
                                {move || if busy.get() { "Starting…" } else { "Start" }}
                            </button>
                        }.into_any()
                    }}
                </div>
            </div>

            <div class="stat-grid">
                <button class="card stat-card" on:click=move |_| ctx.navigate(Section::PrivatePackages)>
                    <div class="stat-value">{move || count_text(overview.with(|o| o.private_count))}</div>
                    <div class="stat-label">"Private packages"</div>
                </button>
                <button class="card stat-card" on:click=move |_| ctx.navigate(Section::CachedPackages)>
                    <div class="stat-value">{move || count_text(overview.with(|o| o.cached_count))}</div>
                    <div class="stat-label">"Cached packages"</div>
                </button>
                <button class="card stat-card" on:click=move |_| ctx.navigate(Section::Users)>
                    <div class="stat-value">{move || count_text(overview.with(|o| o.user_count))}</div>
                    <div class="stat-label">"Users"</div>
                </button>
            </div>

            <div class="card paths-card">
                <div class="path-row">
                    <span class="muted">"Storage"</span>
                    <code>{move || overview.with(|o| o.status.storage_path.clone())}</code>
                    <button class="btn btn-small" on:click=on_open_storage>"Open"</button>
                </div>
                <div class="path-row">
                    <span class="muted">"Config"</span>
                    <code>{move || overview.with(|o| o.status.config_path.clone())}</code>
                    <button class="btn btn-small" on:click=move |_| ctx.navigate(Section::Config)>"Edit"</button>
                </div>
            </div>
        </section>
    }
}
