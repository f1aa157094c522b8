use super::model::is_generation_model;
use crate::models::{AgentMode, ChatSettings, ModePrompts};

/// Tri-state classification of the current system prompt.
///
/// `Default` means exact equality with one of the three canned mode
/// prompts. The comparison is deliberately byte-exact: a prompt that
/// drifted from the preset library by so much as trailing whitespace
/// counts as `Custom` and is protected from automatic rewrites.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    Empty,
    Default,
    Custom,
}

/// The user-facing prompt-type selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptChoice {
    Empty,
    Default,
    Custom,
}

pub fn classify(prompt: &str, prompts: &ModePrompts) -> PromptKind {
    if prompt.is_empty() {
        PromptKind::Empty
    } else if prompt == prompts.agent || prompt == prompts.edit || prompt == prompts.ask {
        PromptKind::Default
    } else {
        PromptKind::Custom
    }
}

/// Change the agent mode, swapping in the new mode's canned prompt unless
/// the user has written their own. Generation models never carry system
/// instructions, so their prompt stays empty across mode switches.
pub fn switch_mode(settings: &mut ChatSettings, mode: AgentMode, prompts: &ModePrompts) {
    if !is_generation_model(&settings.model) {
        match classify(&settings.system_prompt, prompts) {
            PromptKind::Empty | PromptKind::Default => {
                settings.system_prompt = prompts.for_mode(mode).to_string();
            }
            PromptKind::Custom => {}
        }
    }
    settings.agent_mode = mode;
}

/// Apply the prompt-type selector. `Custom` is a no-op: the user switches
/// to custom by editing the text area, not through the selector. The
/// selector has no effect for generation models.
pub fn select_prompt_type(settings: &mut ChatSettings, choice: PromptChoice, prompts: &ModePrompts) {
    if is_generation_model(&settings.model) {
        return;
    }
    match choice {
        PromptChoice::Default => {
            settings.system_prompt = prompts.for_mode(settings.agent_mode).to_string();
        }
        PromptChoice::Empty => settings.system_prompt.clear(),
        PromptChoice::Custom => {}
    }
}

/// Direct edit of the prompt text area. Reclassification is implicit:
/// whatever was typed is compared against the canned prompts on the next
/// [`classify`] call.
pub fn edit_prompt(settings: &mut ChatSettings, text: impl Into<String>) {
    settings.system_prompt = text.into();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ChatSettings {
        ChatSettings::default()
    }

    #[test]
    fn empty_prompt_classified_empty() {
        assert_eq!(classify("", &ModePrompts::default()), PromptKind::Empty);
    }

    #[test]
    fn canned_prompt_of_any_mode_classified_default() {
        let prompts = ModePrompts::default();
        assert_eq!(classify(&prompts.agent, &prompts), PromptKind::Default);
        assert_eq!(classify(&prompts.edit, &prompts), PromptKind::Default);
        assert_eq!(classify(&prompts.ask, &prompts), PromptKind::Default);
    }

    #[test]
    fn whitespace_drift_classified_custom() {
        let prompts = ModePrompts::default();
        let drifted = format!("{} ", prompts.agent);
        assert_eq!(classify(&drifted, &prompts), PromptKind::Custom);
    }

    #[test]
    fn mode_switch_replaces_empty_prompt() {
        let prompts = ModePrompts::default();
        let mut s = settings();
        switch_mode(&mut s, AgentMode::Agent, &prompts);
        assert_eq!(s.agent_mode, AgentMode::Agent);
        assert_eq!(s.system_prompt, prompts.agent);
    }

    #[test]
    fn mode_switch_replaces_previous_default_prompt() {
        let prompts = ModePrompts::default();
        let mut s = settings();
        s.agent_mode = AgentMode::Agent;
        s.system_prompt = prompts.agent.clone();
        switch_mode(&mut s, AgentMode::Edit, &prompts);
        assert_eq!(s.system_prompt, prompts.edit);
    }

    #[test]
    fn mode_switch_leaves_custom_prompt_alone() {
        let prompts = ModePrompts::default();
        let mut s = settings();
        s.system_prompt = "custom text".to_string();
        switch_mode(&mut s, AgentMode::Edit, &prompts);
        assert_eq!(s.agent_mode, AgentMode::Edit);
        assert_eq!(s.system_prompt, "custom text");
    }

    #[test]
    fn selector_forces_default_and_clears() {
        let prompts = ModePrompts::default();
        let mut s = settings();
        s.agent_mode = AgentMode::Edit;
        s.system_prompt = "whatever".to_string();

        select_prompt_type(&mut s, PromptChoice::Default, &prompts);
        assert_eq!(s.system_prompt, prompts.edit);

        select_prompt_type(&mut s, PromptChoice::Empty, &prompts);
        assert_eq!(s.system_prompt, "");

        s.system_prompt = "hand written".to_string();
        select_prompt_type(&mut s, PromptChoice::Custom, &prompts);
        assert_eq!(s.system_prompt, "hand written");
    }

    #[test]
    fn generation_model_prompt_stays_empty_across_mode_switch() {
        let prompts = ModePrompts::default();
        let mut s = settings();
        s.context_level = 3;
        s.system_prompt = "some instructions".to_string();
        crate::engine::select_model(&mut s, "openai", "dall-e-3");

        switch_mode(&mut s, AgentMode::Agent, &prompts);
        assert_eq!(s.agent_mode, AgentMode::Agent);
        assert_eq!(s.system_prompt, "");
        assert_eq!(s.context_level, 0);

        // No canned prompt may leak into the outgoing payload either
        let fields = crate::engine::build_fields(&s, "hello");
        assert_eq!(fields["prompt"], serde_json::json!("hello"));
    }

    #[test]
    fn prompt_type_selector_is_inert_for_generation_models() {
        let prompts = ModePrompts::default();
        let mut s = settings();
        crate::engine::select_model(&mut s, "openai", "dall-e-3");

        select_prompt_type(&mut s, PromptChoice::Default, &prompts);
        assert_eq!(s.system_prompt, "");
    }

    #[test]
    fn ask_to_agent_to_custom_edit_scenario() {
        let prompts = ModePrompts::default();
        let mut s = settings();
        assert_eq!(s.agent_mode, AgentMode::Ask);
        assert_eq!(s.system_prompt, "");

        switch_mode(&mut s, AgentMode::Agent, &prompts);
        assert_eq!(s.system_prompt, prompts.agent);

        edit_prompt(&mut s, "custom text");
        assert_eq!(classify(&s.system_prompt, &prompts), PromptKind::Custom);

        switch_mode(&mut s, AgentMode::Edit, &prompts);
        assert_eq!(s.system_prompt, "custom text");
    }
}
