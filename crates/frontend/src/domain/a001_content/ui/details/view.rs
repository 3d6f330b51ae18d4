use super::view_model::ContentDetailsVm;
use contracts::domain::a001_content::aggregate::ContentStatus;
use leptos::prelude::*;
use std::rc::Rc;

#[component]
pub fn ContentDetails(
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let vm = ContentDetailsVm::new();
    vm.load_if_needed(id);

    let vm_clone = vm.clone();

    view! {
        <div class="details-container content-details">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode() { "Edit record" } else { "New record" }
                    }
                </h3>
            </div>

            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            <div class="details-form">
                <div class="form-group">
                    <label for="content_type">"Type"</label>
                    <select
                        id="content_type"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().content_type
                        }
                        on:change={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.content_type = event_target_value(&ev))
                        }
                    >
                        <option value="post">"Post"</option>
                        <option value="page">"Page"</option>
                    </select>
                </div>

                <div class="form-group">
                    <label for="title">"Title"</label>
                    <input
                        type="text"
                        id="title"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().title
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.set_title(event_target_value(&ev))
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="slug">"Slug"</label>
                    <input
                        type="text"
                        id="slug"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().slug
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.set_slug(event_target_value(&ev))
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="status">"Status"</label>
                    <select
                        id="status"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().status.as_str()
                        }
                        on:change={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let status = event_target_value(&ev)
                                    .parse::<ContentStatus>()
                                    .unwrap_or_default();
                                vm.form.update(|f| f.status = status);
                            }
                        }
                    >
                        <option value="draft">"Draft"</option>
                        <option value="published">"Published"</option>
                    </select>
                </div>

                <div class="form-group">
                    <label for="excerpt">"Excerpt"</label>
                    <input
                        type="text"
                        id="excerpt"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().excerpt
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.excerpt = event_target_value(&ev))
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="body">"Body (HTML)"</label>
                    <textarea
                        id="body"
                        rows="10"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().body
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.body = event_target_value(&ev))
                        }
                    ></textarea>
                </div>

                <div class="form-group">
                    <label for="category_id">"Category"</label>
                    <input
                        type="text"
                        id="category_id"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().category_id
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.category_id = event_target_value(&ev))
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="seo_title">"SEO title"</label>
                    <input
                        type="text"
                        id="seo_title"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().seo_title
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.seo_title = event_target_value(&ev))
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="seo_description">"SEO description"</label>
                    <textarea
                        id="seo_description"
                        rows="2"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().seo_description
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.seo_description = event_target_value(&ev))
                        }
                    ></textarea>
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="button button--primary"
                    disabled={
                        let vm = vm_clone.clone();
                        move || vm.is_saving.get()
                    }
                    on:click={
                        let vm = vm_clone.clone();
                        let on_saved = on_saved.clone();
                        move |_| vm.save_command(on_saved.clone())
                    }
                >
                    "Save"
                </button>
                <button
                    class="button button--secondary"
                    on:click={
                        let on_cancel = on_cancel.clone();
                        move |_| (on_cancel)(())
                    }
                >
                    "Cancel"
                </button>
            </div>
        </div>
    }
}
