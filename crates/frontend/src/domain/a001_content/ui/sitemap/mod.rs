use crate::domain::a001_content::api;
use contracts::shared::sitemap::{RouteSource, SitemapResponse};
use leptos::prelude::*;

#[component]
pub fn SitemapPage() -> impl IntoView {
    let (sitemap, set_sitemap) = signal(SitemapResponse::default());
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            match api::sitemap().await {
                Ok(s) => set_sitemap.set(s),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    view! {
        <div class="sitemap">
            <h2>"Routes"</h2>
            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
            <ul>
                {move || sitemap.get().entries.into_iter().map(|entry| {
                    let kind = match entry.source {
                        RouteSource::Static => "static",
                        RouteSource::Content => "content",
                    };
                    view! {
                        <li>
                            <code>{entry.path}</code>
                            " "
                            <span class="muted">{kind}</span>
                            {entry.last_modified.map(|m| view! { <small>" " {m}</small> })}
                        </li>
                    }
                }).collect_view()}
            </ul>
        </div>
    }
}
