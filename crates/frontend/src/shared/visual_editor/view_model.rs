use super::dom_tree::DomTree;
use super::model::{self, BackendPatchApplier};
use contracts::shared::visual_editor::{
    dispatch_save, is_editable_attribute, ChangeSet, EditorError, EditorSession, EditorSettings,
    EntryId, PendingDecision, SaveCompletion, SelectRequest,
};
use leptos::prelude::*;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use web_sys::HtmlIFrameElement;

type SessionHandle = Rc<RefCell<EditorSession<DomTree>>>;

/// Строка списка компонентов
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub id: EntryId,
    pub tag_name: String,
    pub source: String,
    pub explicit_source: bool,
    pub excerpt: String,
}

/// Одно редактируемое свойство выбранного компонента
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub key: String,
    pub baseline: String,
    pub value: String,
    pub changed: bool,
}

/// ViewModel визуального редактора
#[derive(Clone, Copy)]
pub struct VisualEditorVm {
    session: StoredValue<Option<SessionHandle>, LocalStorage>,
    pub settings: RwSignal<EditorSettings>,
    pub generation: RwSignal<u64>,
    pub entries: RwSignal<Vec<EntryRow>>,
    pub truncated: RwSignal<bool>,
    pub selected: RwSignal<Option<EntryId>>,
    pub fields: RwSignal<Vec<FieldRow>>,
    pub has_changes: RwSignal<bool>,
    pub is_saving: RwSignal<bool>,
    pub can_undo: RwSignal<bool>,
    pub can_redo: RwSignal<bool>,
    pub pending: RwSignal<Option<PendingDecision>>,
    pub error: RwSignal<Option<String>>,
    pub status: RwSignal<Option<String>>,
}

impl VisualEditorVm {
    pub fn new() -> Self {
        Self {
            session: StoredValue::new_local(None),
            settings: RwSignal::new(EditorSettings::default()),
            generation: RwSignal::new(0),
            entries: RwSignal::new(Vec::new()),
            truncated: RwSignal::new(false),
            selected: RwSignal::new(None),
            fields: RwSignal::new(Vec::new()),
            has_changes: RwSignal::new(false),
            is_saving: RwSignal::new(false),
            can_undo: RwSignal::new(false),
            can_redo: RwSignal::new(false),
            pending: RwSignal::new(None),
            error: RwSignal::new(None),
            status: RwSignal::new(None),
        }
    }

    /// Загрузить настройки с сервера (по умолчанию если недоступны)
    pub fn load_settings(&self) {
        let settings = self.settings;
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_settings().await {
                Ok(s) => settings.set(s),
                Err(e) => {
                    log::warn!("Editor settings unavailable, using defaults: {}", e);
                    error.set(Some(format!("Editor settings unavailable: {}", e)));
                }
            }
        });
    }

    fn handle(&self) -> Option<SessionHandle> {
        self.session.get_value()
    }

    /// Preview finished loading: start the session or rescan the new page.
    pub fn on_preview_load(&self, iframe: &HtmlIFrameElement) {
        let Some(tree) = DomTree::from_iframe(iframe) else {
            self.error.set(Some(
                "Preview document is not accessible (different origin?)".to_string(),
            ));
            return;
        };

        match self.handle() {
            Some(session) => {
                let generation = session.borrow_mut().reload(tree);
                log::info!("Preview reloaded, scan generation {}", generation);
            }
            None => {
                let session = EditorSession::new(tree, self.settings.get_untracked());
                log::info!(
                    "Editor session started with {} component(s)",
                    session.registry().len()
                );
                self.session.set_value(Some(Rc::new(RefCell::new(session))));
            }
        }
        self.pending.set(None);
        self.sync();
    }

    /// Rescan the current page without reloading it.
    pub fn rescan(&self) {
        if let Some(session) = self.handle() {
            session.borrow_mut().rescan();
            self.pending.set(None);
            self.sync();
        }
    }

    pub fn select(&self, id: EntryId) {
        let Some(session) = self.handle() else {
            return;
        };
        let request = session.borrow_mut().request_select(id);
        match request {
            SelectRequest::Done(outcome) => log::debug!("select {}: {:?}", id, outcome),
            SelectRequest::NeedsConfirmation(decision) => self.pending.set(Some(decision)),
        }
        self.sync();
    }

    /// Answer to the "discard unsaved edits?" dialog.
    pub fn resolve_pending(&self, confirmed: bool) {
        let Some(decision) = self.pending.get_untracked() else {
            return;
        };
        self.pending.set(None);
        if let Some(session) = self.handle() {
            session.borrow_mut().resolve(decision, confirmed);
            self.sync();
        }
    }

    pub fn clear_selection(&self) {
        if let Some(session) = self.handle() {
            session.borrow_mut().clear_selection();
            self.sync();
        }
    }

    pub fn set_field(&self, key: &str, value: String) {
        let Some(session) = self.handle() else {
            return;
        };
        let result = session.borrow_mut().set_property(key, value);
        if let Err(e) = result {
            self.report(e);
        }
        self.sync();
    }

    /// Adds an attribute the component does not carry yet.
    pub fn add_field(&self, key: &str) {
        let key = key.trim().to_lowercase();
        if key.is_empty() || self.fields.get_untracked().iter().any(|f| f.key == key) {
            return;
        }
        if !is_editable_attribute(&key) {
            self.error
                .set(Some(format!("Only class, id, style and data-* attributes are editable, got `{}`", key)));
            return;
        }
        self.set_field(&key, String::new());
    }

    pub fn reset(&self) {
        if let Some(session) = self.handle() {
            session.borrow_mut().reset();
            self.sync();
        }
    }

    /// Сохранить изменения (последний запрос побеждает)
    pub fn save_command(&self) {
        let Some(session) = self.handle() else {
            return;
        };
        let vm = *self;
        let timeout_ms = self.settings.get_untracked().save_timeout_ms;
        self.status.set(None);
        self.is_saving.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            let timeout =
                gloo_timers::future::TimeoutFuture::new(timeout_ms.min(u32::MAX as u64) as u32);
            match dispatch_save(&session, &BackendPatchApplier, timeout).await {
                Ok(SaveCompletion::Committed(change_set)) => {
                    vm.error.set(None);
                    vm.status.set(Some(format!("Saved {} change(s)", change_set.len())));
                }
                Ok(SaveCompletion::Superseded) => {}
                Err(e) => vm.report(e),
            }
            vm.sync();
        });
    }

    pub fn undo(&self) {
        let Some(session) = self.handle() else {
            return;
        };
        let step = session.borrow_mut().undo();
        self.after_history_step(step, "Undo");
    }

    pub fn redo(&self) {
        let Some(session) = self.handle() else {
            return;
        };
        let step = session.borrow_mut().redo();
        self.after_history_step(step, "Redo");
    }

    /// Forwards a history step the preview already shows. A step that could
    /// not be applied is reported and never reaches the backend.
    fn after_history_step(&self, step: Result<ChangeSet, EditorError>, label: &'static str) {
        self.sync();
        let change_set = match step {
            Ok(change_set) => change_set,
            Err(e) => {
                self.report(e);
                return;
            }
        };
        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            match model::forward_history_step(&change_set).await {
                Ok(()) => vm.status.set(Some(format!("{}: {} change(s)", label, change_set.len()))),
                Err(e) => vm.error.set(Some(format!("{} applied in preview only: {}", label, e))),
            }
        });
    }

    pub fn dismiss_error(&self) {
        self.error.set(None);
    }

    /// Ends the session when the editor page goes away.
    pub fn teardown(&self) {
        if let Some(session) = self.session.try_get_value().flatten() {
            session.borrow_mut().teardown();
        }
        let _ = self.session.try_set_value(None);
    }

    fn report(&self, err: EditorError) {
        if err.is_user_facing() {
            self.error.set(Some(err.to_string()));
        } else {
            log::debug!("editor: {}", err);
        }
    }

    /// Copy session state into signals.
    fn sync(&self) {
        let Some(session) = self.handle() else {
            return;
        };
        let Ok(session) = session.try_borrow() else {
            // A save is settling; it syncs when done.
            return;
        };

        let generation = session.generation();
        if self.generation.get_untracked() != generation {
            self.entries.set(
                session
                    .registry()
                    .entries()
                    .iter()
                    .map(|e| EntryRow {
                        id: e.id,
                        tag_name: e.tag_name.clone(),
                        source: e.source_hint.value.clone(),
                        explicit_source: e.source_hint.explicit,
                        excerpt: e.excerpt.clone(),
                    })
                    .collect(),
            );
            self.truncated.set(session.registry().truncated());
            self.generation.set(generation);
        }

        self.selected.set(session.selected().map(|e| e.id));
        self.fields.set(field_rows(&session));
        self.has_changes.set(session.has_changes());
        self.is_saving.set(session.is_saving());
        self.can_undo.set(session.can_undo());
        self.can_redo.set(session.can_redo());
    }
}

impl Default for VisualEditorVm {
    fn default() -> Self {
        Self::new()
    }
}

fn field_rows(session: &EditorSession<DomTree>) -> Vec<FieldRow> {
    let baseline = session.baseline();
    let buffer = session.edit_buffer();
    let keys: BTreeSet<&String> = baseline.keys().chain(buffer.keys()).collect();
    keys.into_iter()
        .map(|key| {
            let base = baseline.get(key).cloned().unwrap_or_default();
            let value = buffer.get(key).cloned().unwrap_or_default();
            FieldRow {
                key: key.clone(),
                changed: base != value,
                baseline: base,
                value,
            }
        })
        .collect()
}
