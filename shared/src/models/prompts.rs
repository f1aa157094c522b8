use super::settings::AgentMode;
use serde::{Deserialize, Serialize};

/// The three canned system prompts, one per agent mode.
///
/// Normally fetched from the prompt-preset library; the defaults below are
/// the built-in fallback when that load fails. Classification of a prompt
/// as "default" is exact string equality against these, so the texts must
/// match what the backend serves byte-for-byte.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModePrompts {
    pub agent: String,
    pub edit: String,
    pub ask: String,
}

impl ModePrompts {
    pub fn for_mode(&self, mode: AgentMode) -> &str {
        match mode {
            AgentMode::Agent => &self.agent,
            AgentMode::Edit => &self.edit,
            AgentMode::Ask => &self.ask,
        }
    }
}

impl Default for ModePrompts {
    fn default() -> Self {
        Self {
            agent: "You are a workflow assistant with full write access. You may \
                    create, modify, connect and delete nodes on the user's canvas \
                    to carry out their request."
                .to_string(),
            edit: "You are a workflow assistant limited to content edits. You may \
                   change the text and parameters of existing nodes but must not \
                   add, remove or rewire them."
                .to_string(),
            ask: "You are a read-only workflow assistant. Answer questions about \
                  the user's canvas and data, but never modify anything."
                .to_string(),
        }
    }
}
