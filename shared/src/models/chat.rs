use super::message::ChatMessage;
use super::settings::AgentMode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: Uuid,
    /// The agent preset this chat was started from, if any.
    #[serde(default)]
    pub agent_id: Option<Uuid>,
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreateChatRequest {
    pub agent_id: Option<Uuid>,
}

/// Body of the chat-send endpoint. `fields` is the model parameter object
/// assembled by the payload builder; the raw message travels alongside it
/// so the backend can persist it unmerged.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatSendRequest {
    pub message: String,
    pub agent_mode: AgentMode,
    pub context_level: u8,
    pub fields: serde_json::Map<String, serde_json::Value>,
}
