//! Packages Page
//!
//! Server-side paged package list for one [`PackageKind`], with a local
//! filter, single and bulk delete, and the details drawer.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::packages::{delete_all, delete_one, live_port, load_page};
use crate::commands::BulkScope;
use crate::components::{ConfirmDialog, DeleteConfirmButton, PackageDrawer, PaginationBar};
use crate::context::use_app_context;
use crate::destructive::Destructive;
use crate::listing::{displayed_total, filter_records, DEFAULT_PAGE_SIZE};
use crate::models::{PackageKind, PackageRecord, Page};
use crate::notify::use_notifier;

fn bulk_scope_for(kind: PackageKind) -> BulkScope {
    match kind {
        PackageKind::Cached => BulkScope::CachedOnly,
        PackageKind::Private | PackageKind::All => BulkScope::Everything,
    }
}

fn bulk_message(scope: BulkScope) -> &'static str {
    match scope {
        BulkScope::CachedOnly => {
            "Remove every package cached from the upstream registry? They will be fetched again on next install."
        }
        BulkScope::Everything => {
            "Remove EVERY stored package, including private packages published here? This cannot be undone."
        }
    }
}

#[component]
pub fn PackagesPage(kind: PackageKind) -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();

    let port = RwSignal::new(None::<u16>);
    let listing = RwSignal::new(Page::<PackageRecord>::empty(DEFAULT_PAGE_SIZE));
    let (resolved, set_resolved) = signal(false);
    let (loading, set_loading) = signal(false);
    let query = RwSignal::new(String::new());
    let row_delete = RwSignal::new(Destructive::<String>::Idle);
    let bulk = RwSignal::new(Destructive::<BulkScope>::Idle);
    let selected = RwSignal::new(None::<String>);

    let fetch = move |page: usize, page_size: usize| {
        let Some(live) = port.get_untracked() else {
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            match load_page(&ctx.api, live, kind, page, page_size).await {
                Ok(next) => {
                    listing.try_set(next);
                }
                Err(e) => {
                    warn!("[Packages] load failed: {}", e);
                    notifier.error(e.message());
                }
            }
            set_loading.try_set(false);
        });
    };

    let reload = move || {
        spawn_local(async move {
            match live_port(&ctx.api).await {
                Ok(live) => {
                    port.try_set(live);
                    set_resolved.try_set(true);
                    let page_size = listing.get_untracked().page_size;
                    match live {
                        Some(_) => fetch(1, page_size),
                        None => {
                            listing.try_set(Page::empty(page_size));
                        }
                    }
                }
                Err(e) => {
                    warn!("[Packages] status check failed: {}", e);
                    set_resolved.try_set(true);
                }
            }
        });
    };
    reload();

    let confirm_row_delete = move || {
        let Some(name) = row_delete.try_update(|d| d.confirm()).flatten() else {
            return;
        };
        let Some(live) = port.get_untracked() else {
            row_delete.update(|d| d.finish());
            return;
        };
        spawn_local(async move {
            let current = listing.get_untracked();
            match delete_one(&ctx.api, live, kind, &name, &current).await {
                Ok(next) => {
                    notifier.success(format!("Deleted {}", name));
                    listing.try_set(next);
                    if selected.get_untracked().as_deref() == Some(name.as_str()) {
                        selected.try_set(None);
                    }
                }
                Err(e) => notifier.error(e.message()),
            }
            row_delete.try_update(|d| d.finish());
        });
    };

    let confirm_bulk = move || {
        let Some(scope) = bulk.try_update(|d| d.confirm()).flatten() else {
            return;
        };
        let Some(live) = port.get_untracked() else {
            bulk.update(|d| d.finish());
            return;
        };
        let page_size = listing.get_untracked().page_size;
        spawn_local(async move {
            match delete_all(&ctx.api, live, scope, kind, page_size).await {
                Ok(outcome) => {
                    notifier.success(outcome.notice());
                    if let Some(next) = outcome.page {
                        listing.try_set(next);
                    }
                    selected.try_set(None);
                }
                Err(e) => notifier.error(e.message()),
            }
            bulk.try_update(|d| d.finish());
        });
    };

    let scope = bulk_scope_for(kind);
    let visible = Memo::new(move |_| listing.with(|p| filter_records(&p.items, &query.get())));
    let busy = Signal::derive(move || loading.get() || row_delete.with(|d| d.is_in_flight()) || bulk.with(|d| d.is_busy()));

    view! {
        <section class="page packages">
            <header class="page-header">
                <h1>{kind.label()}</h1>
                <div class="toolbar">
                    <input
                        class="search"
                        type="search"
                        placeholder="Filter this page…"
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                    <button class="btn" disabled=move || busy.get() on:click=move |_| reload()>"Refresh"</button>
                    <button
                        class="btn btn-danger"
                        disabled=move || busy.get() || port.get().is_none() || listing.with(|p| p.total == 0)
                        on:click=move |_| {
                            bulk.update(|d| {
                                d.request(scope);
                            });
                        }
                    >
                        {match scope {
                            BulkScope::CachedOnly => "Clear cache",
                            BulkScope::Everything => "Delete all",
                        }}
                    </button>
                </div>
            </header>

            {move || {
                if !resolved.get() {
                    view! { <p class="placeholder">"Loading…"</p> }.into_any()
                } else if port.get().is_none() {
                    view! {
                        <p class="placeholder">"The registry is not running. Start it from the dashboard to browse packages."</p>
                    }.into_any()
                } else if visible.with(|v| v.is_empty()) {
                    view! {
                        <p class="placeholder">
                            {move || if query.with(|q| q.trim().is_empty()) { "No packages" } else { "No packages match the filter" }}
                        </p>
                    }.into_any()
                } else {
                    view! {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Version"</th>
                                    <th>"Description"</th>
                                    <th>"Author"</th>
                                    <th>"Modified"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || visible.get()
                                    key=|pkg| (pkg.name.clone(), pkg.version.clone())
                                    children=move |pkg| {
                                        let name = pkg.name.clone();
                                        let row_name = name.clone();
                                        let confirming = Signal::derive({
                                            let name = name.clone();
                                            move || row_delete.with(|d| d.pending() == Some(&name))
                                        });
                                        view! {
                                            <tr class="clickable" on:click=move |_| selected.set(Some(row_name.clone()))>
                                                <td class="pkg-name">{pkg.name}</td>
                                                <td>{pkg.version}</td>
                                                <td class="muted">{pkg.description.unwrap_or_default()}</td>
                                                <td>{pkg.author.unwrap_or_default()}</td>
                                                <td class="muted">{pkg.modified.unwrap_or_default()}</td>
                                                <td class="row-actions">
                                                    <DeleteConfirmButton
                                                        confirming=confirming
                                                        busy=busy
                                                        on_request=move |_| {
                                                            let name = name.clone();
                                                            row_delete.update(|d| {
                                                                d.request(name);
                                                            });
                                                        }
                                                        on_confirm=move |_| confirm_row_delete()
                                                        on_cancel=move |_| row_delete.update(|d| d.cancel())
                                                    />
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    }.into_any()
                }
            }}

            <PaginationBar
                page=Signal::derive(move || listing.with(|p| p.page))
                total_pages=Signal::derive(move || listing.with(|p| p.total_pages))
                page_size=Signal::derive(move || listing.with(|p| p.page_size))
                total=Signal::derive(move || {
                    listing.with(|p| displayed_total(p.total, visible.with(|v| v.len()), &query.get()))
                })
                disabled=busy
                on_page=move |page| fetch(page, listing.get_untracked().page_size)
                on_page_size=move |size| fetch(1, size)
            />

            <ConfirmDialog
                open=Signal::derive(move || bulk.with(|d| d.is_busy()))
                busy=Signal::derive(move || bulk.with(|d| d.is_in_flight()))
                title=kind.label()
                message=Signal::derive(move || bulk_message(scope).to_string())
                confirm_label="Delete"
                on_confirm=move |_| confirm_bulk()
                on_cancel=move |_| bulk.update(|d| d.cancel())
            />

            <PackageDrawer
                name=selected
                port=port
                on_close=move |_| selected.set(None)
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_view_has_one_bulk_scope() {
        assert_eq!(bulk_scope_for(PackageKind::Cached), BulkScope::CachedOnly);
        assert_eq!(bulk_scope_for(PackageKind::Private), BulkScope::Everything);
        assert!(bulk_message(BulkScope::Everything).contains("private"));
    }
}
