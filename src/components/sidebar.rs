//! Sidebar Component
//!
//! Section navigation plus the color scheme switch.

use leptos::prelude::*;

use crate::context::{use_app_context, ColorScheme, Section};

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="sidebar">
            <div class="sidebar-brand">
                <span class="sidebar-logo">"V"</span>
                <span class="sidebar-title">"Verdaccio Console"</span>
            </div>
            <ul class="sidebar-nav">
                {Section::ALL
                    .iter()
                    .map(|&section| {
                        let item_class = move || {
                            if ctx.section.get() == section { "nav-item active" } else { "nav-item" }
                        };
                        view! {
                            <li>
                                <button class=item_class on:click=move |_| ctx.navigate(section)>
                                    <span class="nav-icon">{section.icon()}</span>
                                    <span class="nav-label">{section.label()}</span>
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <button class="scheme-toggle" on:click=move |_| ctx.toggle_scheme()>
                {move || match ctx.scheme.get() {
                    ColorScheme::Light => "☾ Dark mode",
                    ColorScheme::Dark => "☀ Light mode",
                }}
            </button>
        </nav>
    }
}
