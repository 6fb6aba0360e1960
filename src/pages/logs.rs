//! Logs Page
//!
//! Registry output, polled every second while the page is open.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::listing::{filter_logs, LevelFilter};
use crate::models::LogEntry;
use crate::notify::use_notifier;
use crate::poller::{poll, ActionGuard, LOGS_INTERVAL};

#[component]
pub fn LogsPage() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();
    let guard = ActionGuard::new();

    let entries = RwSignal::new(Vec::<LogEntry>::new());
    let level = RwSignal::new(LevelFilter::All);
    let query = RwSignal::new(String::new());
    let paused = RwSignal::new(false);
    let (confirm_clear, set_confirm_clear) = signal(false);

    let refresh = move || {
        if paused.get_untracked() {
            return;
        }
        let Some(ticket) = guard.begin_refresh() else {
            return;
        };
        spawn_local(async move {
            let result = ctx.api.get_verdaccio_logs().await;
            // A clear that ran meanwhile makes this snapshot stale
            if !ticket.is_current() {
                return;
            }
            match result {
                Ok(next) => {
                    // Skip the write when nothing changed to keep the list still
                    if entries.with_untracked(|cur| *cur != next) {
                        entries.try_set(next);
                    }
                }
                Err(e) => warn!("[Logs] refresh failed: {}", e),
            }
        });
    };
    refresh();
    poll(LOGS_INTERVAL, guard, refresh);

    let on_clear = move |_| {
        set_confirm_clear.set(false);
        if !guard.try_begin() {
            return;
        }
        spawn_local(async move {
            match ctx.api.clear_verdaccio_logs().await {
                Ok(()) => {
                    entries.try_set(Vec::new());
                    notifier.info("Logs cleared");
                }
                Err(e) => notifier.error(e.message()),
            }
            guard.end();
        });
    };

    let visible = Memo::new(move |_| entries.with(|all| filter_logs(all, level.get(), &query.get())));

    view! {
        <section class="page logs">
            <header class="page-header">
                <h1>"Logs"</h1>
                <div class="toolbar">
                    <select
                        class="level-select"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            if let Some(filter) = LevelFilter::ALL.iter().find(|f| f.label() == value) {
                                level.set(*filter);
                            }
                        }
                    >
                        {LevelFilter::ALL
                            .iter()
                            .map(|f| view! {
                                <option value=f.label() selected=move || level.get() == *f>{f.label()}</option>
                            })
                            .collect_view()}
                    </select>
                    <input
                        class="search"
                        type="search"
                        placeholder="Search messages…"
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                    <button class="btn" on:click=move |_| paused.update(|p| *p = !*p)>
                        {move || if paused.get() { "Resume" } else { "Pause" }}
                    </button>
                    <Show
                        when=move || confirm_clear.get()
                        fallback=move || view! {
                            <button
                                class="btn btn-danger-ghost"
                                disabled=move || guard.busy().get()
                                on:click=move |_| set_confirm_clear.set(true)
                            >
                                "Clear"
                            </button>
                        }
                    >
                        <span class="delete-confirm">
                            <span class="delete-confirm-text">"Clear all logs?"</span>
                            <button class="confirm-btn" on:click=on_clear>"✓"</button>
                            <button class="cancel-btn" on:click=move |_| set_confirm_clear.set(false)>"✗"</button>
                        </span>
                    </Show>
                </div>
            </header>

            <div class="log-view">
                <Show
                    when=move || !visible.with(|v| v.is_empty())
                    fallback=|| view! { <p class="placeholder">"No log entries"</p> }
                >
                    <For
                        each=move || visible.get()
                        key=|entry| entry.seq
                        children=|entry| view! {
                            <div class="log-line">
                                <span class="log-time">{entry.timestamp.clone()}</span>
                                <span class=entry.level.css_class()>{entry.level.to_string()}</span>
                                <span class="log-message">{entry.message}</span>
                            </div>
                        }
                    />
                </Show>
            </div>
            <footer class="log-footer muted">
                {move || format!("{} of {} entries", visible.with(|v| v.len()), entries.with(|e| e.len()))}
            </footer>
        </section>
    }
}
