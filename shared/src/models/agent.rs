use super::schema::ModelSchemaInput;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved agent with its embedded AI configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentPreset {
    pub id: Uuid,
    pub title: String,
    pub icon: String,
    pub config: AgentAiConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentAiConfig {
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub system_prompt: String,
    /// Form fields the preset declares for its own input dialog, if any.
    #[serde(default)]
    pub input_fields: Vec<ModelSchemaInput>,
}
