use crate::models::ChatSettings;

/// Model-id fragments identifying image and video generation models.
///
/// Matched by substring against the full model id. Generation models never
/// receive conversational context or system instructions; this is platform
/// policy, not a preference.
pub const GENERATION_MODEL_PREFIXES: &[&str] = &[
    "dall-e",
    "gpt-image",
    "stable-diffusion",
    "sdxl",
    "flux",
    "midjourney",
    "imagen",
    "sora",
    "runway",
    "veo",
    "kling",
];

pub fn is_generation_model(model_id: &str) -> bool {
    GENERATION_MODEL_PREFIXES
        .iter()
        .any(|prefix| model_id.contains(prefix))
}

/// Record a provider/model selection, enforcing the generation-model
/// policy: context level 0 and no system prompt, regardless of prior state.
pub fn select_model(settings: &mut ChatSettings, provider: impl Into<String>, model: impl Into<String>) {
    settings.provider = provider.into();
    settings.model = model.into();
    if is_generation_model(&settings.model) {
        settings.context_level = 0;
        settings.system_prompt.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_ids_match_by_substring() {
        assert!(is_generation_model("dall-e-3"));
        assert!(is_generation_model("black-forest-labs/flux-1.1-pro"));
        assert!(is_generation_model("veo-2"));
        assert!(!is_generation_model("gpt-4o"));
        assert!(!is_generation_model("claude-sonnet-4"));
    }

    #[test]
    fn generation_model_forces_context_zero_and_empty_prompt() {
        let mut s = ChatSettings::default();
        s.context_level = 3;
        s.system_prompt = "some instructions".to_string();
        select_model(&mut s, "openai", "dall-e-3");
        assert_eq!(s.context_level, 0);
        assert_eq!(s.system_prompt, "");
    }

    #[test]
    fn conversational_model_keeps_prior_state() {
        let mut s = ChatSettings::default();
        s.context_level = 5;
        s.system_prompt = "keep me".to_string();
        select_model(&mut s, "anthropic", "claude-sonnet-4");
        assert_eq!(s.provider, "anthropic");
        assert_eq!(s.model, "claude-sonnet-4");
        assert_eq!(s.context_level, 5);
        assert_eq!(s.system_prompt, "keep me");
    }
}
