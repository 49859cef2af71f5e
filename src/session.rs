use log::{debug, info};

use crate::error::ChatStateError;
use crate::messages::MessageHistory;
use crate::models::conversations::{Message, MessagesResponse};
use crate::stream::{StreamState, StreamStatus};

/// Follow-up work the caller owes after a transition. The session never
/// fetches or cancels anything itself, it only says what the external
/// collaborators need to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Fetch a fresh message snapshot for the selected thread and hand it
    /// to `complete_refetch` (or `apply_snapshot` for an initial load).
    RefetchMessages,
    /// Tell the streaming collaborator to drop its overlay. Issued only
    /// after the fresh snapshot is installed, so the rendered view never
    /// momentarily loses the streamed tail.
    ClearStream,
}

/// Tracks which thread is on screen, its persisted history, and the last
/// observed stream status. Stream-status edges are handled here as explicit
/// transitions: leaving `Inflight` means the service has settled the run
/// and the persisted list is now more complete than the overlay.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    thread_id: Option<String>,
    history: MessageHistory,
    last_status: Option<StreamStatus>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn history(&self) -> &MessageHistory {
        &self.history
    }

    pub fn resumeable(&self) -> bool {
        self.history.resumeable()
    }

    /// Switches threads. The old base snapshot is dropped immediately (the
    /// view reads "no messages yet" until the new fetch lands) and the
    /// caller is asked to fetch. A response still in flight for the old
    /// thread is stale and must be discarded by the caller, not installed.
    pub fn select_thread(&mut self, thread_id: Option<String>) -> Option<SyncAction> {
        if self.thread_id == thread_id {
            return None;
        }
        info!(
            "switching thread {:?} -> {:?}",
            self.thread_id, thread_id
        );
        self.thread_id = thread_id;
        self.history.clear();
        self.last_status = None;
        self.thread_id.as_ref().map(|_| SyncAction::RefetchMessages)
    }

    /// Installs the base snapshot for the selected thread.
    pub fn apply_snapshot(&mut self, snapshot: MessagesResponse) -> Result<(), ChatStateError> {
        self.history.install(snapshot)
    }

    /// Watches the stream status. On the edge out of `Inflight` the
    /// resumeable flag is dropped right away and the caller is told to
    /// refetch; until the refetch lands the overlay keeps the view whole.
    pub fn observe_stream(&mut self, stream: &StreamState) -> Option<SyncAction> {
        let prev = self.last_status.replace(stream.status());
        if prev == Some(StreamStatus::Inflight) && stream.status() != StreamStatus::Inflight {
            debug!("stream settled as {:?}, refetching", stream.status());
            self.history.clear_resumeable();
            return Some(SyncAction::RefetchMessages);
        }
        None
    }

    /// Second half of the post-stream sequence: install the fresh snapshot
    /// first, then clear the overlay.
    pub fn complete_refetch(
        &mut self,
        snapshot: MessagesResponse,
    ) -> Result<SyncAction, ChatStateError> {
        self.history.install(snapshot)?;
        Ok(SyncAction::ClearStream)
    }

    /// The merged list a viewer should render right now.
    pub fn messages(&self, stream: Option<&StreamState>) -> Option<Vec<Message>> {
        self.history.view(stream)
    }
}
