//! Delete Confirm Button Component
//!
//! Inline confirm/cancel for deleting one row.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows a "Delete" button initially. While `confirming`, shows "Delete?" with ✓/✗.
/// The confirmation state lives with the caller so a page can track which
/// row is pending.
///
/// # Arguments
/// * `confirming` - Whether this row is waiting for confirmation
/// * `busy` - Disables the trigger while any delete is in flight
/// * `on_request` / `on_confirm` / `on_cancel` - State transitions
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] confirming: Signal<bool>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_request: Callback<()>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show
            when=move || confirming.get()
            fallback=move || view! {
                <button
                    class="btn btn-small btn-danger-ghost"
                    disabled=move || busy.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_request.run(());
                    }
                >
                    "Delete"
                </button>
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_cancel.run(());
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
