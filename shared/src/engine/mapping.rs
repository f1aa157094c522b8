use crate::models::{ChatSettings, ModelSchemaInput};

/// The general prompt field; system text with no dedicated field is
/// merged into it rather than dropped.
pub const PROMPT_FIELD: &str = "prompt";

/// Dedicated system-instruction field names, in detection priority order.
const SYSTEM_TARGET_PRIORITY: &[&str] =
    &["system_instruction", "system_prompt", "system", "system_message"];

/// Pick the request field that should carry the system prompt, given a
/// model's declared inputs. Only textual fields qualify.
pub fn detect_system_prompt_target(inputs: &[ModelSchemaInput]) -> String {
    for name in SYSTEM_TARGET_PRIORITY {
        if inputs
            .iter()
            .any(|input| input.kind.is_textual() && input.name == *name)
        {
            return (*name).to_string();
        }
    }
    PROMPT_FIELD.to_string()
}

/// Re-run system-prompt target detection for a freshly loaded schema.
/// A target the user picked by hand is never overridden.
pub fn apply_schema(settings: &mut ChatSettings, inputs: &[ModelSchemaInput]) {
    if !settings.field_mapping.manual.system_prompt {
        settings.field_mapping.system_prompt = detect_system_prompt_target(inputs);
    }
}

pub fn set_system_prompt_target(settings: &mut ChatSettings, target: impl Into<String>) {
    settings.field_mapping.system_prompt = target.into();
    settings.field_mapping.manual.system_prompt = true;
}

pub fn set_temperature_target(settings: &mut ChatSettings, target: impl Into<String>) {
    settings.field_mapping.temperature = target.into();
    settings.field_mapping.manual.temperature = true;
}

pub fn set_max_tokens_target(settings: &mut ChatSettings, target: impl Into<String>) {
    settings.field_mapping.max_tokens = target.into();
    settings.field_mapping.manual.max_tokens = true;
}

/// Max-tokens targets the UI offers. The OpenAI family additionally
/// accepts `max_completion_tokens` on newer models.
pub fn max_tokens_target_options(provider: &str) -> &'static [&'static str] {
    if provider.eq_ignore_ascii_case("openai") {
        &["max_tokens", "max_completion_tokens"]
    } else {
        &["max_tokens"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SchemaInputKind;

    fn input(name: &str, kind: SchemaInputKind) -> ModelSchemaInput {
        ModelSchemaInput {
            name: name.to_string(),
            kind,
            required: false,
            default: None,
        }
    }

    #[test]
    fn system_instruction_wins_detection() {
        let inputs = vec![
            input("prompt", SchemaInputKind::Text),
            input("system", SchemaInputKind::String),
            input("system_instruction", SchemaInputKind::String),
        ];
        assert_eq!(detect_system_prompt_target(&inputs), "system_instruction");
    }

    #[test]
    fn falls_through_priority_list() {
        let inputs = vec![
            input("prompt", SchemaInputKind::Text),
            input("system_message", SchemaInputKind::String),
        ];
        assert_eq!(detect_system_prompt_target(&inputs), "system_message");
    }

    #[test]
    fn prompt_fallback_when_no_dedicated_field() {
        let inputs = vec![
            input("prompt", SchemaInputKind::Text),
            input("width", SchemaInputKind::Number),
        ];
        assert_eq!(detect_system_prompt_target(&inputs), "prompt");
    }

    #[test]
    fn non_textual_system_field_is_ignored() {
        let inputs = vec![
            input("system", SchemaInputKind::Boolean),
            input("prompt", SchemaInputKind::Text),
        ];
        assert_eq!(detect_system_prompt_target(&inputs), "prompt");
    }

    #[test]
    fn schema_load_respects_manual_choice() {
        let inputs = vec![input("system_instruction", SchemaInputKind::String)];
        let mut s = ChatSettings::default();
        set_system_prompt_target(&mut s, "system");
        apply_schema(&mut s, &inputs);
        assert_eq!(s.field_mapping.system_prompt, "system");

        let mut auto = ChatSettings::default();
        apply_schema(&mut auto, &inputs);
        assert_eq!(auto.field_mapping.system_prompt, "system_instruction");
    }

    #[test]
    fn empty_schema_resolves_to_prompt() {
        let mut s = ChatSettings::default();
        s.field_mapping.system_prompt = "system".to_string();
        apply_schema(&mut s, &[]);
        assert_eq!(s.field_mapping.system_prompt, "prompt");
    }

    #[test]
    fn openai_gets_alternate_max_tokens_target() {
        assert_eq!(
            max_tokens_target_options("openai"),
            &["max_tokens", "max_completion_tokens"]
        );
        assert_eq!(max_tokens_target_options("replicate"), &["max_tokens"]);
    }
}
