use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ChatStateError;
use crate::messages::merge_messages_by_id;
use crate::models::conversations::Message;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Idle,
    Inflight,
    Done,
    Error,
}

/// Overlay state for one in-flight assistant run. The transport feeding it
/// lives elsewhere; this type only owns the partial messages and the status
/// tag the session watches for transitions.
#[derive(Debug, Clone)]
pub struct StreamState {
    status: StreamStatus,
    messages: Vec<Message>,
}

impl Default for StreamState {
    fn default() -> Self {
        StreamState {
            status: StreamStatus::Idle,
            messages: Vec::new(),
        }
    }
}

impl StreamState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StreamStatus {
        self.status
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    // a run starts with the optimistic input as its overlay
    pub fn start(input: Vec<Message>) -> Self {
        StreamState {
            status: StreamStatus::Inflight,
            messages: input,
        }
    }

    /// Folds a partial message batch into the overlay: same id replaces,
    /// new id appends. Batches must arrive in emission order, the caller
    /// serializes delivery.
    pub fn absorb(&mut self, batch: Vec<Message>) -> Result<(), ChatStateError> {
        if batch.iter().any(|m| m.id.is_empty()) {
            return Err(ChatStateError::MissingMessageId);
        }
        let current = std::mem::take(&mut self.messages);
        self.messages =
            merge_messages_by_id(Some(current.as_slice()), Some(batch.as_slice())).unwrap_or_default();
        Ok(())
    }

    // leaves Inflight; the overlay stays up until the refetched base lands
    pub fn finish(&mut self, status: StreamStatus) {
        debug!("stream finished with status {status:?}");
        self.status = status;
    }

    pub fn clear(&mut self) {
        self.status = StreamStatus::Idle;
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::conversations::MessageContent;

    fn partial(id: &str, text: &str) -> Message {
        Message {
            id: id.to_string(),
            kind: "ai".to_string(),
            content: MessageContent::Text(text.to_string()),
            name: None,
            additional_kwargs: None,
            example: false,
        }
    }

    #[test]
    fn test_start_holds_input_as_overlay() {
        let input = Message::human("what is a stream?");
        let stream = StreamState::start(vec![input.clone()]);
        assert_eq!(stream.status(), StreamStatus::Inflight);
        assert_eq!(stream.messages().len(), 1);
        assert_eq!(stream.messages()[0], input);
    }

    #[test]
    fn test_absorb_grows_the_answer_in_place() {
        let mut stream = StreamState::start(vec![Message::human("hi")]);
        stream.absorb(vec![partial("ai-1", "He")]).unwrap();
        stream.absorb(vec![partial("ai-1", "Hello")]).unwrap();
        stream.absorb(vec![partial("ai-1", "Hello there")]).unwrap();

        assert_eq!(stream.messages().len(), 2);
        assert_eq!(stream.messages()[1].text(), Some("Hello there"));
    }

    #[test]
    fn test_absorb_rejects_missing_id() {
        let mut stream = StreamState::start(vec![]);
        let err = stream.absorb(vec![partial("", "nameless")]).unwrap_err();
        assert_eq!(err, ChatStateError::MissingMessageId);
        assert!(stream.messages().is_empty());
    }

    #[test]
    fn test_finish_keeps_overlay_until_cleared() {
        let mut stream = StreamState::start(vec![Message::human("hi")]);
        stream.absorb(vec![partial("ai-1", "Hello")]).unwrap();

        stream.finish(StreamStatus::Done);
        assert_eq!(stream.status(), StreamStatus::Done);
        assert_eq!(stream.messages().len(), 2);

        stream.clear();
        assert_eq!(stream.status(), StreamStatus::Idle);
        assert!(stream.messages().is_empty());
    }

    #[test]
    fn test_status_tags_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&StreamStatus::Inflight).unwrap(),
            "\"inflight\""
        );
        assert_eq!(
            serde_json::from_str::<StreamStatus>("\"error\"").unwrap(),
            StreamStatus::Error
        );
    }
}
