//! Config Page
//!
//! Plain-text editor for the registry's YAML config. The text is saved
//! verbatim; the registry reads it on its next start.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::config::{load_config, reset_config};
use crate::context::use_app_context;
use crate::draft::Draft;
use crate::notify::use_notifier;

#[component]
pub fn ConfigPage() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();

    let draft = RwSignal::new(Draft::<String>::default());
    let (path, set_path) = signal(String::new());
    let (loaded, set_loaded) = signal(false);
    let (saving, set_saving) = signal(false);
    let (confirm_reset, set_confirm_reset) = signal(false);

    spawn_local(async move {
        match load_config(&ctx.api).await {
            Ok(doc) => {
                draft.try_update(|d| d.load(doc.text));
                set_path.try_set(doc.path);
                set_loaded.try_set(true);
            }
            Err(e) => {
                warn!("[Config] load failed: {}", e);
                notifier.error(e.message());
            }
        }
    });

    let on_save = move |_| {
        if saving.get_untracked() {
            return;
        }
        let sent = draft.with_untracked(|d| d.current().clone());
        set_saving.set(true);
        spawn_local(async move {
            match ctx.api.save_verdaccio_config(&sent).await {
                Ok(()) => {
                    draft.try_update(|d| d.commit(sent));
                    notifier.success("Config saved. Restart the registry to apply it.");
                }
                Err(e) => notifier.error(e.message()),
            }
            set_saving.try_set(false);
        });
    };

    let on_reset = move |_| {
        set_confirm_reset.set(false);
        set_saving.set(true);
        spawn_local(async move {
            match reset_config(&ctx.api).await {
                Ok(doc) => {
                    draft.try_update(|d| d.load(doc.text));
                    notifier.success("Config restored to defaults");
                }
                Err(e) => notifier.error(e.message()),
            }
            set_saving.try_set(false);
        });
    };

    let dirty = Signal::derive(move || draft.with(|d| d.is_dirty()));

    view! {
        <section class="page config">
            <header class="page-header">
                <div>
                    <h1>"Config"</h1>
                    <code class="muted">{move || path.get()}</code>
                </div>
                <div class="toolbar">
                    <Show when=move || dirty.get()>
                        <span class="dirty-marker">"Unsaved changes"</span>
                    </Show>
                    <button
                        class="btn"
                        disabled=move || !dirty.get() || saving.get()
                        on:click=move |_| draft.update(|d| d.revert())
                    >
                        "Revert"
                    </button>
                    <Show
                        when=move || confirm_reset.get()
                        fallback=move || view! {
                            <button
                                class="btn btn-danger-ghost"
                                disabled=move || saving.get() || !loaded.get()
                                on:click=move |_| set_confirm_reset.set(true)
                            >
                                "Reset to default"
                            </button>
                        }
                    >
                        <span class="delete-confirm">
                            <span class="delete-confirm-text">"Overwrite config.yaml?"</span>
                            <button class="confirm-btn" on:click=on_reset>"✓"</button>
                            <button class="cancel-btn" on:click=move |_| set_confirm_reset.set(false)>"✗"</button>
                        </span>
                    </Show>
                    <button
                        class="btn btn-primary"
                        disabled=move || !dirty.get() || saving.get()
                        on:click=on_save
                    >
                        {move || if saving.get() { "Saving…" } else { "Save" }}
                    </button>
                </div>
            </header>

            <textarea
                class="config-editor"
                spellcheck="false"
                disabled=move || !loaded.get()
                prop:value=move || draft.with(|d| d.current().clone())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    draft.update(|d| d.edit(text));
                }
            ></textarea>
        </section>
    }
}
