use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content of one chat stream event the scanner can mine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
#[serde(rename_all = "snake_case")]
pub enum ChatPayload {
    /// Assistant text response
    Message(MessagePayload),

    /// Tool invocation result (serialized output, often JSON-ish)
    ToolResult(ToolResultPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    pub output: String,
}

/// One newly-arrived event from the chat transport.
///
/// The `id` is the transport's message/invocation id; the scanner's dedup
/// guard keys on it, so ids must be stable across re-deliveries of the same
/// event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,

    #[serde(flatten)]
    pub payload: ChatPayload,
}

impl ChatEvent {
    pub fn message(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: Utc::now(),
            payload: ChatPayload::Message(MessagePayload { text: text.into() }),
        }
    }

    pub fn tool_result(
        id: impl Into<String>,
        tool_name: Option<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: Utc::now(),
            payload: ChatPayload::ToolResult(ToolResultPayload {
                tool_name,
                output: output.into(),
            }),
        }
    }

    /// The scannable text of this event regardless of payload shape
    pub fn text(&self) -> &str {
        match &self.payload {
            ChatPayload::Message(m) => &m.text,
            ChatPayload::ToolResult(t) => &t.output,
        }
    }
}
