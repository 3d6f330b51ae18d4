use crate::domain::a001_content::api;
use crate::domain::a001_content::ui::details::ContentDetails;
use contracts::domain::a001_content::aggregate::{ContentRecord, ContentStats};
use leptos::prelude::*;
use std::rc::Rc;

/// Which record the details form edits
#[derive(Debug, Clone, PartialEq)]
enum Editing {
    Closed,
    New,
    Existing(String),
}

#[component]
pub fn ContentListPage() -> impl IntoView {
    let (items, set_items) = signal::<Vec<ContentRecord>>(Vec::new());
    let (stats, set_stats) = signal(ContentStats::default());
    let (type_filter, set_type_filter) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let editing = RwSignal::new(Editing::Closed);

    let fetch = move || {
        let filter = type_filter.get_untracked();
        wasm_bindgen_futures::spawn_local(async move {
            let content_type = (!filter.is_empty()).then_some(filter.as_str());
            match api::list(content_type).await {
                Ok(v) => {
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            match api::stats().await {
                Ok(s) => set_stats.set(s),
                Err(e) => log::warn!("Failed to load content stats: {}", e),
            }
        });
    };

    Effect::new(move |_| {
        type_filter.track();
        fetch();
    });

    let delete = move |id: String| {
        wasm_bindgen_futures::spawn_local(async move {
            match api::delete(&id).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="content-list">
            <div class="header">
                <h2>"Content"</h2>
                <div class="stats">
                    <span>"Total: " {move || stats.get().total}</span>
                    <span>"Published: " {move || stats.get().published}</span>
                    <span>"Drafts: " {move || stats.get().draft}</span>
                </div>
                <div class="header-actions">
                    <select
                        prop:value=move || type_filter.get()
                        on:change=move |ev| set_type_filter.set(event_target_value(&ev))
                    >
                        <option value="">"All types"</option>
                        <option value="post">"Posts"</option>
                        <option value="page">"Pages"</option>
                    </select>
                    <button class="button button--primary" on:click=move |_| editing.set(Editing::New)>
                        "New"
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>"Refresh"</button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            {move || {
                let id = match editing.get() {
                    Editing::Closed => return None,
                    Editing::New => None,
                    Editing::Existing(id) => Some(id),
                };
                let on_saved: Rc<dyn Fn(())> = Rc::new(move |_| {
                    editing.set(Editing::Closed);
                    fetch();
                });
                let on_cancel: Rc<dyn Fn(())> = Rc::new(move |_| editing.set(Editing::Closed));
                Some(view! {
                    <div class="modal-overlay">
                        <div class="modal">
                            <ContentDetails id=id on_saved=on_saved on_cancel=on_cancel />
                        </div>
                    </div>
                })
            }}

            <table class="table">
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"Path"</th>
                        <th>"Status"</th>
                        <th>"Updated"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || items.get()
                        key=|r| (r.to_string_id(), r.metadata.version)
                        children=move |r| {
                            let id = r.to_string_id();
                            let edit_id = id.clone();
                            view! {
                                <tr>
                                    <td>
                                        <a href="#" on:click=move |ev| {
                                            ev.prevent_default();
                                            editing.set(Editing::Existing(edit_id.clone()));
                                        }>{r.title.clone()}</a>
                                    </td>
                                    <td><code>{r.public_path()}</code></td>
                                    <td>{r.status.to_string()}</td>
                                    <td>{r.metadata.updated_at.format("%Y-%m-%d %H:%M").to_string()}</td>
                                    <td>
                                        <button class="button button--small" on:click=move |_| delete(id.clone())>
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
