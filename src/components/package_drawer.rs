//! Package Drawer Component
//!
//! Side panel with one package's metadata and rendered README.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::packages::load_details;
use crate::context::use_app_context;
use crate::markdown::render_readme;
use crate::package_details::PackageDetails;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DrawerTab {
    #[default]
    Readme,
    Versions,
    Raw,
}

/// Details drawer for `name`; closed while `name` is `None`
#[component]
pub fn PackageDrawer(
    #[prop(into)] name: Signal<Option<String>>,
    #[prop(into)] port: Signal<Option<u16>>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (details, set_details) = signal::<Option<PackageDetails>>(None);
    let (loading, set_loading) = signal(false);
    let (failure, set_failure) = signal::<Option<String>>(None);
    let (tab, set_tab) = signal(DrawerTab::default());

    // Fetch whenever the selected package changes
    Effect::new(move |_| {
        let (Some(pkg), Some(port)) = (name.get(), port.get()) else {
            set_details.set(None);
            return;
        };
        set_loading.set(true);
        set_failure.set(None);
        set_tab.set(DrawerTab::Readme);
        spawn_local(async move {
            let result = load_details(&ctx.api, port, &pkg).await;
            // A newer selection wins
            if name.try_get_untracked().flatten().as_deref() != Some(pkg.as_str()) {
                return;
            }
            match result {
                Ok(loaded) => {
                    set_details.try_set(Some(loaded));
                }
                Err(e) => {
                    warn!("[PackageDrawer] {}: {}", pkg, e);
                    set_failure.try_set(Some(e.message()));
                }
            }
            set_loading.try_set(false);
        });
    });

    let tab_button = move |target: DrawerTab, label: &'static str| {
        view! {
            <button
                class=move || if tab.get() == target { "tab active" } else { "tab" }
                on:click=move |_| set_tab.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <Show when=move || name.get().is_some()>
            <aside class="drawer">
                <header class="drawer-header">
                    <h2>{move || name.get().unwrap_or_default()}</h2>
                    <button class="drawer-close" on:click=move |_| on_close.run(())>"×"</button>
                </header>

                <Show when=move || loading.get()>
                    <p class="placeholder">"Loading…"</p>
                </Show>
                <Show when=move || failure.get().is_some()>
                    <p class="placeholder error">{move || failure.get().unwrap_or_default()}</p>
                </Show>

                {move || details.get().filter(|_| !loading.get()).map(|d| {
                    let latest = d.latest_summary().cloned();
                    let readme_html = d.readme.as_deref().map(render_readme);
                    let versions = d.versions.clone();
                    let raw = d.pretty_json();
                    view! {
                        <dl class="drawer-meta">
                            <dt>"Latest"</dt>
                            <dd>{d.latest.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"License"</dt>
                            <dd>{latest.as_ref().and_then(|v| v.license.clone()).unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Published"</dt>
                            <dd>{latest.as_ref().and_then(|v| v.published.clone()).unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Homepage"</dt>
                            <dd>{match (d.homepage_link(), d.homepage.clone()) {
                                (Some(href), Some(label)) => view! {
                                    <a href=href.to_string() target="_blank" rel="noopener noreferrer">{label}</a>
                                }.into_any(),
                                (None, Some(label)) => view! { <span>{label}</span> }.into_any(),
                                _ => view! { <span>"-"</span> }.into_any(),
                            }}</dd>
                            <dt>"Repository"</dt>
                            <dd>{d.repository.clone().unwrap_or_else(|| "-".to_string())}</dd>
                        </dl>

                        <div class="tabs">
                            {tab_button(DrawerTab::Readme, "README")}
                            {tab_button(DrawerTab::Versions, "Versions")}
                            {tab_button(DrawerTab::Raw, "Metadata")}
                        </div>

                        {move || match tab.get() {
                            DrawerTab::Readme => match readme_html.clone() {
                                Some(html) => view! { <div class="markdown-body" inner_html=html></div> }.into_any(),
                                None => view! { <p class="placeholder">"No README"</p> }.into_any(),
                            },
                            DrawerTab::Versions => view! {
                                <ul class="version-list">
                                    {versions.iter().map(|v| view! {
                                        <li>
                                            <span class="version">{v.version.clone()}</span>
                                            <span class="muted">{v.published.clone().unwrap_or_default()}</span>
                                        </li>
                                    }).collect_view()}
                                </ul>
                            }.into_any(),
                            DrawerTab::Raw => view! { <pre class="raw-json">{raw.clone()}</pre> }.into_any(),
                        }}
                    }
                })}
            </aside>
        </Show>
    }
}
