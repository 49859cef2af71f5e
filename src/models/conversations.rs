use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// thread record as the service reports it (list fetch or create/rename response)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Chat {
    pub thread_id: String,
    pub assistant_id: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: MessageContent,
    pub name: Option<String>,
    pub additional_kwargs: Option<AdditionalKwargs>,
    #[serde(default)]
    pub example: bool,
}

impl Message {
    // optimistic composer message, shown while the run is in flight
    pub fn human(content: impl Into<String>) -> Self {
        Message {
            id: uuid::Uuid::new_v4().to_string(),
            kind: "human".to_string(),
            content: MessageContent::Text(content.into()),
            name: None,
            additional_kwargs: None,
            example: false,
        }
    }

    pub fn is_human(&self) -> bool {
        self.kind == "human"
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(text) => Some(text),
            _ => None,
        }
    }
}

// plain text, retrieval fragments, or whatever else the assistant produced
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Documents(Vec<DocumentFragment>),
    Structured(Value),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DocumentFragment {
    pub page_content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct AdditionalKwargs {
    pub name: Option<String>,
    pub function_call: Option<FunctionCall>,
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct FunctionCall {
    pub name: Option<String>,
    pub arguments: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub function: Option<FunctionCall>,
}

// GET /threads/{id}/messages response body
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub resumeable: bool,
}
