pub mod chats;
pub mod error;
pub mod messages;
pub mod models;
pub mod session;
pub mod stream;
