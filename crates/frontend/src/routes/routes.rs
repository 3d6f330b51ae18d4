use crate::domain::a001_content::ui::list::ContentListPage;
use crate::domain::a001_content::ui::sitemap::SitemapPage;
use crate::layout::Shell;
use crate::shared::rich_text::RichTextEditor;
use crate::shared::visual_editor::VisualEditorPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn DraftPage() -> impl IntoView {
    view! {
        <div class="draft-page">
            <h2>"Draft"</h2>
            <RichTextEditor draft="default" />
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=ContentListPage />
                    <Route path=path!("/editor") view=VisualEditorPage />
                    <Route path=path!("/draft") view=DraftPage />
                    <Route path=path!("/sitemap") view=SitemapPage />
                </Routes>
            </Shell>
        </Router>
    }
}
