use super::model::is_generation_model;
use crate::models::{AgentMode, AgentPreset, ChatSettings};
use uuid::Uuid;

/// Overlay an agent preset's AI configuration onto the settings and put
/// the chat into agent mode. The generation-model policy applies to the
/// preset's model the same as to a manual selection.
pub fn apply_preset(settings: &mut ChatSettings, preset: &AgentPreset) {
    let config = &preset.config;
    settings.provider = config.provider.clone();
    settings.model = config.model.clone();
    settings.temperature = config.temperature;
    settings.max_tokens = config.max_tokens;
    settings.system_prompt = config.system_prompt.clone();
    settings.agent_mode = AgentMode::Agent;
    if is_generation_model(&settings.model) {
        settings.context_level = 0;
        settings.system_prompt.clear();
    }
}

/// Resolve an agent selection. `None` resets to the hard-coded defaults;
/// an id with no matching preset is "no overlay", not a fault.
pub fn select_agent(settings: &mut ChatSettings, id: Option<Uuid>, presets: &[AgentPreset]) {
    match id {
        None => *settings = ChatSettings::default(),
        Some(id) => {
            if let Some(preset) = presets.iter().find(|p| p.id == id) {
                apply_preset(settings, preset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AgentAiConfig;

    fn preset(model: &str) -> AgentPreset {
        AgentPreset {
            id: Uuid::new_v4(),
            title: "Researcher".to_string(),
            icon: "🔍".to_string(),
            config: AgentAiConfig {
                provider: "anthropic".to_string(),
                model: model.to_string(),
                temperature: 0.2,
                max_tokens: 8192,
                system_prompt: "You research things.".to_string(),
                input_fields: Vec::new(),
            },
        }
    }

    #[test]
    fn preset_overlays_config_and_forces_agent_mode() {
        let p = preset("claude-sonnet-4");
        let mut s = ChatSettings::default();
        select_agent(&mut s, Some(p.id), &[p.clone()]);
        assert_eq!(s.provider, "anthropic");
        assert_eq!(s.model, "claude-sonnet-4");
        assert_eq!(s.temperature, 0.2);
        assert_eq!(s.max_tokens, 8192);
        assert_eq!(s.system_prompt, "You research things.");
        assert_eq!(s.agent_mode, AgentMode::Agent);
    }

    #[test]
    fn none_resets_to_defaults() {
        let mut s = ChatSettings::default();
        s.temperature = 1.9;
        s.system_prompt = "anything".to_string();
        select_agent(&mut s, None, &[]);
        assert_eq!(s, ChatSettings::default());
    }

    #[test]
    fn unknown_id_is_no_overlay() {
        let p = preset("claude-sonnet-4");
        let mut s = ChatSettings::default();
        s.temperature = 1.5;
        select_agent(&mut s, Some(Uuid::new_v4()), &[p]);
        assert_eq!(s.temperature, 1.5);
        assert_eq!(s.agent_mode, AgentMode::Ask);
    }

    #[test]
    fn generation_model_preset_gets_policy_applied() {
        let p = preset("flux-1.1-pro");
        let mut s = ChatSettings::default();
        select_agent(&mut s, Some(p.id), &[p]);
        assert_eq!(s.context_level, 0);
        assert_eq!(s.system_prompt, "");
        assert_eq!(s.agent_mode, AgentMode::Agent);
    }
}
