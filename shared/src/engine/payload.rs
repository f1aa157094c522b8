use super::mapping::PROMPT_FIELD;
use crate::models::{ChatSendRequest, ChatSettings};
use serde_json::{Map, Value};

/// Assemble the model parameter object for a chat send.
///
/// The system prompt goes under its mapped target, or is prefixed onto the
/// message inside `prompt` when no dedicated field exists. Additional
/// schema-declared values are inserted last and may override the standard
/// fields.
pub fn build_fields(settings: &ChatSettings, message: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    let mapping = &settings.field_mapping;
    let has_system = !settings.system_prompt.is_empty();

    let prompt_text = if has_system && mapping.system_prompt == PROMPT_FIELD {
        format!("{}\n\n{}", settings.system_prompt, message)
    } else {
        message.to_string()
    };
    fields.insert(PROMPT_FIELD.to_string(), Value::String(prompt_text));

    if has_system && mapping.system_prompt != PROMPT_FIELD {
        fields.insert(
            mapping.system_prompt.clone(),
            Value::String(settings.system_prompt.clone()),
        );
    }

    // From<f32> keeps the shortest decimal representation on the wire
    fields.insert(mapping.temperature.clone(), Value::from(settings.temperature));
    fields.insert(mapping.max_tokens.clone(), Value::from(settings.max_tokens));

    for (name, value) in &settings.additional_fields {
        fields.insert(name.clone(), value.clone());
    }

    fields
}

/// The literal body sent to the chat-send endpoint.
pub fn build_send_request(settings: &ChatSettings, message: impl Into<String>) -> ChatSendRequest {
    let message = message.into();
    ChatSendRequest {
        fields: build_fields(settings, &message),
        message,
        agent_mode: settings.agent_mode,
        context_level: settings.context_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mapping::{
        set_max_tokens_target, set_system_prompt_target, set_temperature_target,
    };
    use serde_json::json;

    #[test]
    fn system_prompt_routed_to_dedicated_target() {
        let mut s = ChatSettings::default();
        s.system_prompt = "be brief".to_string();
        set_system_prompt_target(&mut s, "system_instruction");

        let fields = build_fields(&s, "hello");
        assert_eq!(fields["prompt"], json!("hello"));
        assert_eq!(fields["system_instruction"], json!("be brief"));
    }

    #[test]
    fn system_prompt_merged_into_prompt_when_no_dedicated_field() {
        let mut s = ChatSettings::default();
        s.system_prompt = "be brief".to_string();

        let fields = build_fields(&s, "hello");
        assert_eq!(fields["prompt"], json!("be brief\n\nhello"));
        assert!(!fields.contains_key("system_instruction"));
    }

    #[test]
    fn empty_system_prompt_emits_nothing_extra() {
        let mut s = ChatSettings::default();
        set_system_prompt_target(&mut s, "system");

        let fields = build_fields(&s, "hello");
        assert_eq!(fields["prompt"], json!("hello"));
        assert!(!fields.contains_key("system"));
    }

    #[test]
    fn temperature_and_max_tokens_use_their_targets() {
        let mut s = ChatSettings::default();
        s.temperature = 0.5;
        s.max_tokens = 1024;
        set_max_tokens_target(&mut s, "max_completion_tokens");

        let fields = build_fields(&s, "hi");
        assert_eq!(fields["temperature"], json!(0.5));
        assert_eq!(fields["max_completion_tokens"], json!(1024));
        assert!(!fields.contains_key("max_tokens"));
    }

    #[test]
    fn temperature_keeps_shortest_decimal_form() {
        let mut s = ChatSettings::default();
        s.temperature = 0.7;
        let fields = build_fields(&s, "hi");
        assert_eq!(fields["temperature"], json!(0.7));
        assert_eq!(serde_json::to_string(&fields["temperature"]).unwrap(), "0.7");
    }

    #[test]
    fn temperature_honors_user_selected_target() {
        let mut s = ChatSettings::default();
        s.temperature = 0.9;
        set_temperature_target(&mut s, "temp");

        let fields = build_fields(&s, "hi");
        assert_eq!(fields["temp"], json!(0.9));
        assert!(!fields.contains_key("temperature"));
    }

    #[test]
    fn additional_fields_override_standard_ones() {
        let mut s = ChatSettings::default();
        s.additional_fields
            .insert("temperature".to_string(), json!(1.3));
        s.additional_fields
            .insert("aspect_ratio".to_string(), json!("16:9"));

        let fields = build_fields(&s, "hi");
        assert_eq!(fields["temperature"], json!(1.3));
        assert_eq!(fields["aspect_ratio"], json!("16:9"));
    }

    #[test]
    fn send_request_carries_mode_and_context_level() {
        let mut s = ChatSettings::default();
        s.context_level = 4;
        let req = build_send_request(&s, "hello");
        assert_eq!(req.message, "hello");
        assert_eq!(req.context_level, 4);
        assert_eq!(req.agent_mode, s.agent_mode);
        assert_eq!(req.fields["prompt"], serde_json::json!("hello"));
    }
}
