use crate::shared::api_utils::api_url;
use gloo_net::http::Request;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Copy, Debug, PartialEq)]
enum ServerStatus {
    Online,
    Offline,
    Checking,
}

impl ServerStatus {
    fn display_text(&self) -> &'static str {
        match self {
            ServerStatus::Online => "Server: Online",
            ServerStatus::Offline => "Server: Offline",
            ServerStatus::Checking => "Server: Checking...",
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            ServerStatus::Online => "status-online",
            ServerStatus::Offline => "status-offline",
            ServerStatus::Checking => "status-checking",
        }
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let status = RwSignal::new(ServerStatus::Checking);

    // Проверка сервера при монтировании
    Effect::new(move |_| {
        spawn_local(async move {
            let online = matches!(
                Request::get(&api_url("/health")).send().await,
                Ok(response) if response.ok()
            );
            status.set(if online {
                ServerStatus::Online
            } else {
                ServerStatus::Offline
            });
        });
    });

    view! {
        <footer data-zone="footer" class="status-bar">
            <span class=move || status.get().css_class()>
                {move || status.get().display_text()}
            </span>
        </footer>
    }
}
