use super::{clear_draft, load_draft, save_draft, wrap_selection};
use leptos::html::Textarea;
use leptos::prelude::*;

/// Formatting buttons: label, opening tag, closing tag
const FORMATS: [(&str, &str, &str); 5] = [
    ("B", "<strong>", "</strong>"),
    ("I", "<em>", "</em>"),
    ("H2", "<h2>", "</h2>"),
    ("Quote", "<blockquote>", "</blockquote>"),
    ("Link", "<a href=\"\">", "</a>"),
];

#[component]
pub fn RichTextEditor(#[prop(into)] draft: String) -> impl IntoView {
    let draft = StoredValue::new(draft);
    let content = RwSignal::new(draft.with_value(|d| load_draft(d)).unwrap_or_default());
    let textarea_ref: NodeRef<Textarea> = NodeRef::new();

    // Persist every change
    Effect::new(move |_| {
        let text = content.get();
        draft.with_value(|d| save_draft(d, &text));
    });

    let apply_format = move |open: &'static str, close: &'static str| {
        let Some(textarea) = textarea_ref.get() else {
            return;
        };
        let start = textarea.selection_start().ok().flatten().unwrap_or(0);
        let end = textarea.selection_end().ok().flatten().unwrap_or(start);
        let (text, new_start, new_end) = wrap_selection(&content.get_untracked(), start, end, open, close);
        content.set(text.clone());
        textarea.set_value(&text);
        let _ = textarea.focus();
        let _ = textarea.set_selection_range(new_start, new_end);
    };

    view! {
        <div class="rich-text">
            <div class="rich-text__toolbar">
                {FORMATS
                    .iter()
                    .map(|&(label, open, close)| view! {
                        <button on:click=move |_| apply_format(open, close)>{label}</button>
                    })
                    .collect_view()}
                <button
                    class="button button--secondary"
                    on:click=move |_| {
                        draft.with_value(|d| clear_draft(d));
                        content.set(String::new());
                    }
                >"Clear"</button>
            </div>
            <textarea
                node_ref=textarea_ref
                class="rich-text__area"
                prop:value=move || content.get()
                on:input=move |ev| content.set(event_target_value(&ev))
            ></textarea>
            <div class="rich-text__preview" inner_html=move || content.get()></div>
        </div>
    }
}
