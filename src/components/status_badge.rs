//! Status Badge Component

use leptos::prelude::*;

/// Running/stopped pill
#[component]
pub fn StatusBadge(#[prop(into)] running: Signal<bool>) -> impl IntoView {
    view! {
        <span class=move || if running.get() { "status-badge running" } else { "status-badge stopped" }>
            <span class="status-dot"></span>
            {move || if running.get() { "Running" } else { "Stopped" }}
        </span>
    }
}
