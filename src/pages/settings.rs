//! Settings Page
//!
//! Console preferences. Edits stay local until saved.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::settings::{load_settings, save_settings};
use crate::context::use_app_context;
use crate::draft::Draft;
use crate::models::AppSettings;
use crate::notify::use_notifier;
use crate::validation::parse_port;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();

    let draft = RwSignal::new(Draft::<AppSettings>::default());
    let port_text = RwSignal::new(String::new());
    let port_error = RwSignal::new(None::<String>);
    let (loaded, set_loaded) = signal(false);
    let (saving, set_saving) = signal(false);

    spawn_local(async move {
        match load_settings(&ctx.api).await {
            Ok(settings) => {
                port_text.try_set(settings.default_port.to_string());
                draft.try_update(|d| d.load(settings));
                set_loaded.try_set(true);
            }
            Err(e) => {
                warn!("[Settings] load failed: {}", e);
                notifier.error(e.message());
            }
        }
    });

    let on_port_input = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        match parse_port(&text) {
            Ok(port) => {
                port_error.set(None);
                draft.update(|d| d.update(|s| s.default_port = port));
            }
            Err(e) => port_error.set(Some(e.to_string())),
        }
        port_text.set(text);
    };

    let on_save = move |_| {
        if saving.get_untracked() || port_error.with_untracked(|e| e.is_some()) {
            return;
        }
        let (baseline, next) = draft.with_untracked(|d| (d.baseline().clone(), d.current().clone()));
        set_saving.set(true);
        spawn_local(async move {
            match save_settings(&ctx.api, &baseline, &next).await {
                Ok(()) => {
                    draft.try_update(|d| d.commit(next));
                    notifier.success("Settings saved");
                }
                Err(e) => notifier.error(e.message()),
            }
            set_saving.try_set(false);
        });
    };

    let on_revert = move |_| {
        draft.update(|d| d.revert());
        let port = draft.with_untracked(|d| d.current().default_port);
        port_text.set(port.to_string());
        port_error.set(None);
    };

    let dirty = Signal::derive(move || draft.with(|d| d.is_dirty()));

    let toggle = move |label: &'static str, hint: &'static str, get: fn(&AppSettings) -> bool, set: fn(&mut AppSettings, bool)| {
        view! {
            <label class="setting-row">
                <div>
                    <div class="setting-label">{label}</div>
                    <div class="setting-hint muted">{hint}</div>
                </div>
                <input
                    type="checkbox"
                    disabled=move || !loaded.get()
                    prop:checked=move || draft.with(|d| get(d.current()))
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        draft.update(|d| d.update(|s| set(s, checked)));
                    }
                />
            </label>
        }
    };

    view! {
        <section class="page settings">
            <header class="page-header">
                <h1>"Settings"</h1>
                <div class="toolbar">
                    <Show when=move || dirty.get()>
                        <span class="dirty-marker">"Unsaved changes"</span>
                    </Show>
                    <button class="btn" disabled=move || !dirty.get() || saving.get() on:click=on_revert>
                        "Revert"
                    </button>
                    <button
                        class="btn btn-primary"
                        disabled=move || !dirty.get() || saving.get() || port_error.with(|e| e.is_some())
                        on:click=on_save
                    >
                        {move || if saving.get() { "Saving…" } else { "Save" }}
                    </button>
                </div>
            </header>

            <div class="card settings-card">
                <h2>"Application"</h2>
                {toggle(
                    "Launch at login",
                    "Start the console when you sign in. It opens minimized to the tray.",
                    |s| s.auto_start,
                    |s, v| s.auto_start = v,
                )}
                {toggle(
                    "Close to tray",
                    "Keep running in the tray when the window is closed.",
                    |s| s.minimize_to_tray,
                    |s, v| s.minimize_to_tray = v,
                )}
            </div>

            <div class="card settings-card">
                <h2>"Registry"</h2>
                {toggle(
                    "Start registry on launch",
                    "Start Verdaccio automatically when the console opens.",
                    |s| s.auto_start_verdaccio,
                    |s, v| s.auto_start_verdaccio = v,
                )}
                {toggle(
                    "Allow LAN access",
                    "Listen on all interfaces instead of localhost only. Applies on next start.",
                    |s| s.allow_lan,
                    |s, v| s.allow_lan = v,
                )}
                <label class="setting-row">
                    <div>
                        <div class="setting-label">"Default port"</div>
                        <div class="setting-hint muted">"Port used when starting the registry."</div>
                    </div>
                    <input
                        class="port-input"
                        type="text"
                        inputmode="numeric"
                        disabled=move || !loaded.get()
                        prop:value=move || port_text.get()
                        on:input=on_port_input
                    />
                </label>
                <Show when=move || port_error.with(|e| e.is_some())>
                    <p class="form-error">{move || port_error.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </section>
    }
}
