use super::view_model::{FieldRow, VisualEditorVm};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlIFrameElement;

#[component]
pub fn VisualEditorPage() -> impl IntoView {
    let vm = VisualEditorVm::new();
    vm.load_settings();
    on_cleanup(move || vm.teardown());

    let (new_attr, set_new_attr) = signal(String::new());

    view! {
        <div class="visual-editor">
            <div class="visual-editor__toolbar">
                <span class="visual-editor__url">{move || vm.settings.get().preview_url}</span>
                <button on:click=move |_| vm.rescan()>"Rescan"</button>
                <button
                    disabled=move || !vm.can_undo.get()
                    on:click=move |_| vm.undo()
                >"Undo"</button>
                <button
                    disabled=move || !vm.can_redo.get()
                    on:click=move |_| vm.redo()
                >"Redo"</button>
                {move || vm.status.get().map(|s| view! { <span class="visual-editor__status">{s}</span> })}
            </div>

            {move || vm.error.get().map(|e| view! {
                <div class="error">
                    <span>{e}</span>
                    <button class="error__close" on:click=move |_| vm.dismiss_error()>"×"</button>
                </div>
            })}

            {move || vm.pending.get().map(|decision| view! {
                <div class="modal-overlay">
                    <div class="modal">
                        <p>"Discard unsaved changes to: " {decision.discarded_keys.join(", ")} "?"</p>
                        <button on:click=move |_| vm.resolve_pending(true)>"Discard"</button>
                        <button on:click=move |_| vm.resolve_pending(false)>"Keep editing"</button>
                    </div>
                </div>
            })}

            <div class="visual-editor__body">
                <aside class="visual-editor__entries">
                    <h4>
                        "Components (" {move || vm.entries.get().len()} ")"
                        {move || vm.truncated.get().then(|| view! { <span class="muted">" truncated"</span> })}
                    </h4>
                    <ul>
                        <For
                            each=move || vm.entries.get()
                            key=|row| row.id
                            children=move |row| {
                                let id = row.id;
                                let source_class = if row.explicit_source { "source explicit" } else { "source" };
                                view! {
                                    <li
                                        class=move || {
                                            if vm.selected.get() == Some(id) { "entry entry--active" } else { "entry" }
                                        }
                                        on:click=move |_| vm.select(id)
                                    >
                                        <code>{row.tag_name.clone()}</code>
                                        <span class=source_class>{row.source.clone()}</span>
                                        <small>{row.excerpt.clone()}</small>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </aside>

                <iframe
                    class="visual-editor__preview"
                    src=move || vm.settings.get().preview_url
                    on:load=move |ev| {
                        let iframe = ev
                            .target()
                            .and_then(|t| t.dyn_into::<HtmlIFrameElement>().ok());
                        if let Some(iframe) = iframe {
                            vm.on_preview_load(&iframe);
                        }
                    }
                ></iframe>

                <section class="visual-editor__properties">
                    <Show
                        when=move || vm.selected.get().is_some()
                        fallback=|| view! { <p class="muted">"Select a component"</p> }
                    >
                        <For
                            each=move || vm.fields.get()
                            key=|field| (field.key.clone(), field.value.clone())
                            children=move |field| view! { <PropertyField vm=vm field=field /> }
                        />
                        <div class="form-group">
                            <input
                                type="text"
                                placeholder="data-attribute"
                                prop:value=move || new_attr.get()
                                on:input=move |ev| set_new_attr.set(event_target_value(&ev))
                            />
                            <button on:click=move |_| {
                                vm.add_field(&new_attr.get_untracked());
                                set_new_attr.set(String::new());
                            }>"Add"</button>
                        </div>
                        <div class="details-actions">
                            <button
                                class="button button--primary"
                                disabled=move || !vm.has_changes.get()
                                on:click=move |_| vm.save_command()
                            >
                                {move || if vm.is_saving.get() { "Saving…" } else { "Save" }}
                            </button>
                            <button
                                class="button button--secondary"
                                disabled=move || !vm.has_changes.get()
                                on:click=move |_| vm.reset()
                            >"Reset"</button>
                            <button class="button button--secondary" on:click=move |_| vm.clear_selection()>
                                "Close"
                            </button>
                        </div>
                    </Show>
                </section>
            </div>
        </div>
    }
}

#[component]
fn PropertyField(vm: VisualEditorVm, field: FieldRow) -> impl IntoView {
    let key = field.key.clone();
    let label_class = if field.changed { "changed" } else { "" };
    let title = format!("was: {}", field.baseline);

    view! {
        <div class="form-group">
            <label class=label_class title=title>{field.key.clone()}</label>
            <input
                type="text"
                prop:value=field.value.clone()
                on:change=move |ev| vm.set_field(&key, event_target_value(&ev))
            />
        </div>
    }
}
