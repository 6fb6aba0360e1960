//! Pagination Bar Component
//!
//! Page navigation and page-size selector for server-side paged lists.

use leptos::prelude::*;

use crate::listing::PAGE_SIZES;

#[component]
pub fn PaginationBar(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] page_size: Signal<usize>,
    /// Total shown next to the controls (server count or local match count)
    #[prop(into)]
    total: Signal<usize>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_page: Callback<usize>,
    #[prop(into)] on_page_size: Callback<usize>,
) -> impl IntoView {
    let at_first = move || page.get() <= 1;
    let at_last = move || page.get() >= total_pages.get();

    view! {
        <div class="pagination-bar">
            <span class="pagination-total">{move || format!("{} total", total.get())}</span>
            <div class="pagination-controls">
                <button
                    class="btn btn-small"
                    disabled=move || disabled.get() || at_first()
                    on:click=move |_| on_page.run(page.get_untracked().saturating_sub(1).max(1))
                >
                    "‹ Prev"
                </button>
                <span class="pagination-position">
                    {move || format!("Page {} of {}", page.get(), total_pages.get().max(1))}
                </span>
                <button
                    class="btn btn-small"
                    disabled=move || disabled.get() || at_last()
                    on:click=move |_| on_page.run(page.get_untracked() + 1)
                >
                    "Next ›"
                </button>
                <select
                    class="page-size-select"
                    disabled=move || disabled.get()
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                            on_page_size.run(size);
                        }
                    }
                >
                    {PAGE_SIZES
                        .iter()
                        .map(|&size| {
                            view! {
                                <option value=size.to_string() selected=move || page_size.get() == size>
                                    {format!("{} / page", size)}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}
