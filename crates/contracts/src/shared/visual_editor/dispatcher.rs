//! Save dispatch: ticketing, last-issued-wins, timeout.
//!
//! A save is split in two so the collaborator call never holds the session:
//! [`EditorSession::begin_save`] issues a ticket and the change-set,
//! [`EditorSession::complete_save`] settles it. Only the most recently issued
//! ticket is honoured; anything older is discarded on arrival.

use std::cell::RefCell;
use std::future::Future;

use async_trait::async_trait;
use futures::future::{select, Either};

use super::change_set::{ApplyPatchRequest, ChangeSet};
use super::discoverer::EntryId;
use super::error::{DispatchError, EditorError};
use super::live_tree::LiveTree;
use super::session::EditorSession;

/// The external apply mechanism (HTTP in the app, scripted in tests).
#[async_trait(?Send)]
pub trait PatchApplier {
    async fn apply(&self, request: &ApplyPatchRequest) -> Result<(), DispatchError>;
}

/// Proof of an issued save, handed back on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    seq: u64,
    pub entry: EntryId,
}

impl SaveTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone)]
pub struct PendingSave {
    pub ticket: SaveTicket,
    pub change_set: ChangeSet,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveCompletion {
    Committed(ChangeSet),
    /// A newer save was issued after this one; the result was ignored.
    Superseded,
}

#[derive(Debug, Clone)]
pub(crate) struct InFlight<N> {
    pub seq: u64,
    pub entry: EntryId,
    pub target: N,
    pub change_set: ChangeSet,
}

/// Выдача номеров сохранений: побеждает последнее выданное
#[derive(Debug, Clone)]
pub struct PatchDispatcher<N> {
    issued: u64,
    in_flight: Option<InFlight<N>>,
}

impl<N: Clone> PatchDispatcher<N> {
    pub fn new() -> Self {
        Self {
            issued: 0,
            in_flight: None,
        }
    }

    /// Issue a new save; any earlier one in flight loses its claim.
    pub fn issue(&mut self, entry: EntryId, target: N, change_set: ChangeSet) -> PendingSave {
        self.issued += 1;
        if let Some(previous) = &self.in_flight {
            log::debug!("save #{} superseded by #{}", previous.seq, self.issued);
        }
        self.in_flight = Some(InFlight {
            seq: self.issued,
            entry,
            target,
            change_set: change_set.clone(),
        });
        PendingSave {
            ticket: SaveTicket {
                seq: self.issued,
                entry,
            },
            change_set,
        }
    }

    /// Takes the in-flight save if `ticket` is the authoritative one.
    pub(crate) fn settle(&mut self, ticket: SaveTicket) -> Option<InFlight<N>> {
        match &self.in_flight {
            Some(flight) if flight.seq == ticket.seq => self.in_flight.take(),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Forget the in-flight save; its response will arrive as superseded.
    pub fn cancel(&mut self) {
        self.in_flight = None;
    }
}

impl<N: Clone> Default for PatchDispatcher<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one save end to end: issue, call `applier` raced against `timeout`,
/// settle. The session is only borrowed before and after the await.
pub async fn dispatch_save<T, A, D>(
    session: &RefCell<EditorSession<T>>,
    applier: &A,
    timeout: D,
) -> Result<SaveCompletion, EditorError>
where
    T: LiveTree,
    A: PatchApplier + ?Sized,
    D: Future<Output = ()>,
{
    let pending = session.borrow_mut().begin_save()?;
    let request = pending.change_set.to_request();
    log::debug!(
        "save #{}: {} change(s) for {:?}",
        pending.ticket.seq,
        pending.change_set.len(),
        pending.change_set.source_files()
    );

    let apply = applier.apply(&request);
    let outcome = match select(apply, std::pin::pin!(timeout)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(DispatchError::Timeout),
    };

    session.borrow_mut().complete_save(pending.ticket, outcome)
}
