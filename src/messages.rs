use std::collections::HashMap;

use log::debug;

use crate::error::ChatStateError;
use crate::models::conversations::{Message, MessagesResponse};
use crate::stream::StreamState;

/// Merges the persisted base list with a streaming overlay into the single
/// list a viewer should render. Overlay entries are presumed newer: an id
/// already present in the base is replaced in place, anything else is
/// appended in overlay order. No base snapshot means nothing renderable,
/// whatever the overlay holds.
///
/// Called on every update tick while a stream is active, so the base ids
/// are indexed up front instead of re-scanned per overlay entry.
pub fn merge_messages_by_id(
    base: Option<&[Message]>,
    overlay: Option<&[Message]>,
) -> Option<Vec<Message>> {
    let base = base?;
    let mut merged = base.to_vec();

    let overlay = match overlay {
        Some(overlay) if !overlay.is_empty() => overlay,
        _ => return Some(merged),
    };

    let mut index: HashMap<&str, usize> = base
        .iter()
        .enumerate()
        .map(|(i, message)| (message.id.as_str(), i))
        .collect();

    for message in overlay {
        match index.get(message.id.as_str()) {
            Some(&i) => merged[i] = message.clone(),
            None => {
                index.insert(message.id.as_str(), merged.len());
                merged.push(message.clone());
            }
        }
    }

    Some(merged)
}

/// Owns the last persisted snapshot for the selected thread, plus the
/// server's claim about whether an interrupted stream can be resumed.
/// `None` means no snapshot has arrived yet ("no messages yet", not an
/// error), which is also the state after a thread switch.
#[derive(Debug, Clone, Default)]
pub struct MessageHistory {
    messages: Option<Vec<Message>>,
    resumeable: bool,
}

impl MessageHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Option<&[Message]> {
        self.messages.as_deref()
    }

    pub fn resumeable(&self) -> bool {
        self.resumeable
    }

    pub fn install(&mut self, snapshot: MessagesResponse) -> Result<(), ChatStateError> {
        if snapshot.messages.iter().any(|m| m.id.is_empty()) {
            return Err(ChatStateError::MissingMessageId);
        }
        debug!(
            "installed snapshot of {} messages (resumeable: {})",
            snapshot.messages.len(),
            snapshot.resumeable
        );
        self.messages = Some(snapshot.messages);
        self.resumeable = snapshot.resumeable;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.messages = None;
        self.resumeable = false;
    }

    pub(crate) fn clear_resumeable(&mut self) {
        self.resumeable = false;
    }

    // the merged view; pure with respect to both the history and the stream
    pub fn view(&self, stream: Option<&StreamState>) -> Option<Vec<Message>> {
        merge_messages_by_id(self.messages.as_deref(), stream.map(|s| s.messages()))
    }
}
