//! Confirm Dialog Component
//!
//! Modal confirmation for destructive bulk actions.

use leptos::prelude::*;

#[component]
pub fn ConfirmDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] message: Signal<String>,
    #[prop(into)] confirm_label: String,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| {
                if !busy.get_untracked() {
                    on_cancel.run(());
                }
            }>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <h3 class="modal-title">{title.clone()}</h3>
                    <p class="modal-message">{move || message.get()}</p>
                    <div class="modal-actions">
                        <button
                            class="btn"
                            disabled=move || busy.get()
                            on:click=move |_| on_cancel.run(())
                        >
                            "Cancel"
                        </button>
                        <button
                            class="btn btn-danger"
                            disabled=move || busy.get()
                            on:click=move |_| on_confirm.run(())
                        >
                            {
                                let label = confirm_label.clone();
                                move || if busy.get() { "Working…".to_string() } else { label.clone() }
                            }
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
