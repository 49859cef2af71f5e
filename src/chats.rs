use log::{debug, info};

use crate::error::ChatStateError;
use crate::models::conversations::Chat;

/// Authoritative recency-ordered view of the user's threads. Bulk list
/// fetches replace the working set, single mutation responses upsert into
/// it, and both paths re-sort before the new sequence is visible.
#[derive(Debug, Clone, Default)]
pub struct ChatRegistry {
    chats: Vec<Chat>,
}

impl ChatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    // replace the whole working set with a list fetch result
    pub fn load(&mut self, chats: Vec<Chat>) -> Result<&[Chat], ChatStateError> {
        if chats.iter().any(|c| c.thread_id.is_empty()) {
            return Err(ChatStateError::MissingThreadId);
        }
        info!("loaded {} chats", chats.len());
        self.chats = sort_by_recency(chats);
        Ok(&self.chats)
    }

    // replace any entry with the same thread_id, never append a duplicate
    pub fn upsert(&mut self, chat: Chat) -> Result<&[Chat], ChatStateError> {
        if chat.thread_id.is_empty() {
            return Err(ChatStateError::MissingThreadId);
        }
        debug!("upserting chat {}", chat.thread_id);
        let mut next: Vec<Chat> = self
            .chats
            .drain(..)
            .filter(|c| c.thread_id != chat.thread_id)
            .collect();
        next.push(chat);
        self.chats = sort_by_recency(next);
        Ok(&self.chats)
    }
}

/// Newest first. The sort is stable so entries sharing a timestamp keep
/// their input order across repeated upserts.
pub fn sort_by_recency(mut chats: Vec<Chat>) -> Vec<Chat> {
    chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    chats
}
