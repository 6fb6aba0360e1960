//! Users Page
//!
//! Registry accounts: add, change password, delete.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::users::{add_user, change_password, delete_user, load_users};
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::destructive::Destructive;
use crate::listing::filter_records;
use crate::models::UserAccount;
use crate::notify::use_notifier;
use crate::validation::NewUserForm;

/// Which modal is open
#[derive(Debug, Clone, PartialEq, Eq)]
enum UserModal {
    Add,
    ChangePassword(String),
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = use_app_context();
    let notifier = use_notifier();

    let users = RwSignal::new(Vec::<UserAccount>::new());
    let query = RwSignal::new(String::new());
    let modal = RwSignal::new(None::<UserModal>);
    let form = RwSignal::new(NewUserForm::default());
    let form_error = RwSignal::new(None::<String>);
    let (submitting, set_submitting) = signal(false);
    let deleting = RwSignal::new(Destructive::<String>::Idle);

    spawn_local(async move {
        match load_users(&ctx.api).await {
            Ok(list) => {
                users.try_set(list);
            }
            Err(e) => {
                warn!("[Users] load failed: {}", e);
                notifier.error(e.message());
            }
        }
    });

    let open_modal = move |which: UserModal| {
        let username = match &which {
            UserModal::ChangePassword(name) => name.clone(),
            UserModal::Add => String::new(),
        };
        form.set(NewUserForm { username, ..NewUserForm::default() });
        form_error.set(None);
        modal.set(Some(which));
    };

    // Validation and host errors both keep the modal open
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let Some(which) = modal.get_untracked() else {
            return;
        };
        let fields = form.get_untracked();
        set_submitting.set(true);
        spawn_local(async move {
            let result = match &which {
                UserModal::Add => add_user(&ctx.api, &fields).await.map(|list| {
                    users.try_set(list);
                    format!("User {} added", fields.username.trim())
                }),
                UserModal::ChangePassword(name) => change_password(&ctx.api, name, &fields.password, &fields.confirm)
                    .await
                    .map(|_| format!("Password changed for {}", name)),
            };
            match result {
                Ok(message) => {
                    notifier.success(message);
                    modal.try_set(None);
                }
                Err(e) => {
                    form_error.try_set(Some(e.to_string()));
                }
            }
            set_submitting.try_set(false);
        });
    };

    let confirm_delete = move || {
        let Some(name) = deleting.try_update(|d| d.confirm()).flatten() else {
            return;
        };
        spawn_local(async move {
            match delete_user(&ctx.api, &name).await {
                Ok(list) => {
                    notifier.success(format!("User {} deleted", name));
                    users.try_set(list);
                }
                Err(e) => notifier.error(e.message()),
            }
            deleting.try_update(|d| d.finish());
        });
    };

    let visible = Memo::new(move |_| users.with(|list| filter_records(list, &query.get())));
    let delete_busy = Signal::derive(move || deleting.with(|d| d.is_in_flight()));

    view! {
        <section class="page users">
            <header class="page-header">
                <h1>"Users"</h1>
                <div class="toolbar">
                    <input
                        class="search"
                        type="search"
                        placeholder="Filter users…"
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary" on:click=move |_| open_modal(UserModal::Add)>"Add user"</button>
                </div>
            </header>

            <Show
                when=move || !visible.with(|v| v.is_empty())
                fallback=|| view! { <p class="placeholder">"No users"</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Username"</th>
                            <th>"Created"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || visible.get()
                            key=|user| user.username.clone()
                            children=move |user| {
                                let name = user.username.clone();
                                let pw_name = name.clone();
                                let confirming = Signal::derive({
                                    let name = name.clone();
                                    move || deleting.with(|d| d.pending() == Some(&name))
                                });
                                view! {
                                    <tr>
                                        <td>{user.username}</td>
                                        <td class="muted">{user.created.unwrap_or_else(|| "-".to_string())}</td>
                                        <td class="row-actions">
                                            <button
                                                class="btn btn-small"
                                                on:click=move |_| open_modal(UserModal::ChangePassword(pw_name.clone()))
                                            >
                                                "Change password"
                                            </button>
                                            <DeleteConfirmButton
                                                confirming=confirming
                                                busy=delete_busy
                                                on_request=move |_| {
                                                    let name = name.clone();
                                                    deleting.update(|d| {
                                                        d.request(name);
                                                    });
                                                }
                                                on_confirm=move |_| confirm_delete()
                                                on_cancel=move |_| deleting.update(|d| d.cancel())
                                            />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <Show when=move || modal.with(|m| m.is_some())>
                <div class="modal-backdrop">
                    <form class="modal" on:submit=on_submit>
                        <h3 class="modal-title">
                            {move || match modal.get() {
                                Some(UserModal::ChangePassword(name)) => format!("Change password for {}", name),
                                _ => "Add user".to_string(),
                            }}
                        </h3>
                        <Show when=move || modal.with(|m| matches!(m, Some(UserModal::Add)))>
                            <label class="field">
                                <span>"Username"</span>
                                <input
                                    type="text"
                                    autocomplete="off"
                                    prop:value=move || form.with(|f| f.username.clone())
                                    on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                                />
                            </label>
                        </Show>
                        <label class="field">
                            <span>"Password"</span>
                            <input
                                type="password"
                                prop:value=move || form.with(|f| f.password.clone())
                                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                            />
                        </label>
                        <label class="field">
                            <span>"Confirm password"</span>
                            <input
                                type="password"
                                prop:value=move || form.with(|f| f.confirm.clone())
                                on:input=move |ev| form.update(|f| f.confirm = event_target_value(&ev))
                            />
                        </label>
                        <Show when=move || form_error.with(|e| e.is_some())>
                            <p class="form-error">{move || form_error.get().unwrap_or_default()}</p>
                        </Show>
                        <div class="modal-actions">
                            <button
                                type="button"
                                class="btn"
                                disabled=move || submitting.get()
                                on:click=move |_| modal.set(None)
                            >
                                "Cancel"
                            </button>
                            <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                                {move || if submitting.get() { "Saving…" } else { "Save" }}
                            </button>
                        </div>
                    </form>
                </div>
            </Show>
        </section>
    }
}
