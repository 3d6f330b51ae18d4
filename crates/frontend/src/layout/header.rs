use leptos::prelude::*;
use leptos_router::components::A;

/// Пункты навигации: путь и подпись
const NAV_ITEMS: [(&str, &str); 4] = [
    ("/", "Content"),
    ("/editor", "Visual editor"),
    ("/draft", "Draft"),
    ("/sitemap", "Routes"),
];

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header data-zone="header" class="top-header">
            <span class="top-header__brand">"Site admin"</span>
            <nav class="top-header__nav">
                {NAV_ITEMS
                    .iter()
                    .map(|&(href, label)| view! { <A href=href>{label}</A> })
                    .collect_view()}
            </nav>
        </header>
    }
}
