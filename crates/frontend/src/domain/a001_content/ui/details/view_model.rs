use super::model::{slugify, ContentForm};
use crate::domain::a001_content::api;
use contracts::domain::a001_content::aggregate::is_valid_slug;
use leptos::prelude::*;
use std::rc::Rc;

/// ViewModel для формы записи контента
#[derive(Clone)]
pub struct ContentDetailsVm {
    pub form: RwSignal<ContentForm>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
}

impl ContentDetailsVm {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ContentForm::default()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
        }
    }

    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(id) = id else {
            return;
        };
        let form = self.form;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(record) => form.set(ContentForm::from(record)),
                Err(e) => error.set(Some(format!("Ошибка загрузки: {}", e))),
            }
        });
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.get().id.is_some()
    }

    pub fn set_title(&self, title: String) {
        self.form.update(|f| {
            if !f.slug_touched {
                f.slug = slugify(&title);
            }
            f.title = title;
        });
    }

    pub fn set_slug(&self, slug: String) {
        self.form.update(|f| {
            f.slug = slug;
            f.slug_touched = true;
        });
    }

    fn validate_form(form: &ContentForm) -> Result<(), String> {
        if form.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        if !is_valid_slug(form.slug.trim()) {
            return Err("Slug must be lowercase letters, digits and single dashes".into());
        }
        Ok(())
    }

    /// Сохранить данные на сервер
    pub fn save_command(&self, on_saved: Rc<dyn Fn(())>) {
        let current = self.form.get_untracked();
        if let Err(msg) = Self::validate_form(&current) {
            self.error.set(Some(msg));
            return;
        }

        let dto = (&current).into();
        let error = self.error;
        let is_saving = self.is_saving;
        is_saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::save(&dto).await;
            is_saving.set(false);
            match result {
                Ok(_) => on_saved(()),
                // 409 carries "Slug `x` is already taken"
                Err(e) => error.set(Some(e)),
            }
        });
    }
}

impl Default for ContentDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}
