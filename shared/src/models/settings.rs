use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Permission level the assistant operates under for a chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    /// Full workflow write access.
    Agent,
    /// Content-only edits.
    Edit,
    /// Read-only.
    Ask,
}

/// Which request parameter each logical setting is serialized into.
///
/// Targets are literal field names on the remote model's API. The manual
/// flags record that the user picked a target by hand, which blocks
/// schema auto-detection from overwriting it on the next load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub system_prompt: String,
    pub temperature: String,
    pub max_tokens: String,
    #[serde(default)]
    pub manual: ManualTargets,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualTargets {
    pub system_prompt: bool,
    pub temperature: bool,
    pub max_tokens: bool,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            system_prompt: "prompt".to_string(),
            temperature: "temperature".to_string(),
            max_tokens: "max_tokens".to_string(),
            manual: ManualTargets::default(),
        }
    }
}

/// Per-chat AI settings. Persisted verbatim to the backend and reloaded
/// field-for-field when the chat is reopened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub system_prompt: String,
    pub agent_mode: AgentMode,
    /// How much workflow context is attached to requests, 0..=5.
    pub context_level: u8,
    #[serde(default)]
    pub field_mapping: FieldMapping,
    /// Values for schema-declared parameters beyond the standard set.
    #[serde(default)]
    pub additional_fields: BTreeMap<String, serde_json::Value>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            system_prompt: String::new(),
            agent_mode: AgentMode::Ask,
            context_level: 3,
            field_mapping: FieldMapping::default(),
            additional_fields: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Saved settings are reloaded verbatim when a chat is reopened, so the
    // serde representation has to survive a full round trip untouched.
    #[test]
    fn settings_round_trip_losslessly() {
        let mut settings = ChatSettings::default();
        settings.provider = "replicate".to_string();
        settings.model = "meta/llama-3-70b".to_string();
        settings.temperature = 1.5;
        settings.system_prompt = "stay on topic".to_string();
        settings.agent_mode = AgentMode::Edit;
        settings.context_level = 5;
        settings.field_mapping.system_prompt = "system_instruction".to_string();
        settings.field_mapping.manual.system_prompt = true;
        settings
            .additional_fields
            .insert("seed".to_string(), json!(42));
        settings
            .additional_fields
            .insert("aspect_ratio".to_string(), json!("1:1"));

        let value = serde_json::to_value(&settings).unwrap();
        let reloaded: ChatSettings = serde_json::from_value(value).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn agent_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_value(AgentMode::Agent).unwrap(), json!("agent"));
        assert_eq!(serde_json::to_value(AgentMode::Edit).unwrap(), json!("edit"));
        assert_eq!(serde_json::to_value(AgentMode::Ask).unwrap(), json!("ask"));
    }

    #[test]
    fn mapping_without_manual_flags_still_deserializes() {
        let blob = json!({
            "system_prompt": "system",
            "temperature": "temperature",
            "max_tokens": "max_tokens"
        });
        let mapping: FieldMapping = serde_json::from_value(blob).unwrap();
        assert!(!mapping.manual.system_prompt);
    }
}
