use thiserror::Error;

/// Contract violations raised when a caller hands the state core a record it
/// was required to validate first. Recovery is never attempted: sorting or
/// merging around a record with no identity would corrupt the view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatStateError {
    #[error("Chat is missing a thread_id")]
    MissingThreadId,

    #[error("Message is missing an id")]
    MissingMessageId,
}
