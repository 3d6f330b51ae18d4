//! Visual component editor core.
//!
//! UI-agnostic: works against any [`LiveTree`] (the browser DOM in the
//! frontend, an in-memory tree in tests) and any [`PatchApplier`].
//!
//! Flow: preview load → [`EditorSession::reload`] scans → operator selects →
//! edits go to the diff engine → [`dispatch_save`] sends the change-set and
//! commits it to history on success.

pub mod change_set;
pub mod diff;
pub mod discoverer;
pub mod dispatcher;
pub mod error;
pub mod history;
pub mod live_tree;
pub mod selection;
pub mod session;
pub mod settings;

#[cfg(test)]
mod memory_tree;

pub use change_set::{
    apply_change_set, ApplyPatchRequest, ApplyPatchResponse, AttributeChange, ChangeSet,
    PatchChange, PatchChangeKind, SourcePatch,
};
pub use diff::{PropertyDiff, PropertyDiffEngine};
pub use discoverer::{AttributeSnapshot, ComponentEntry, Discoverer, EntryId, Registry, SourceHint};
pub use dispatcher::{dispatch_save, PatchApplier, PendingSave, SaveCompletion, SaveTicket};
pub use error::{DispatchError, EditorError};
pub use history::{HistoryEntry, HistoryManager};
pub use live_tree::{is_editable_attribute, LiveTree, Rect};
pub use selection::SelectOutcome;
pub use session::{EditorSession, PendingDecision, SelectRequest};
pub use settings::EditorSettings;
