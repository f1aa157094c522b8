use crate::api;
use crate::store::{Action, StoreContext};
use shared::engine;
use shared::engine::{PromptChoice, PromptKind};
use shared::models::{AgentMode, ModelSchemaInput, SchemaInputKind};
use yew::prelude::*;

const PROVIDERS: &[&str] = &["openai", "anthropic", "google", "replicate"];

#[function_component(SettingsModal)]
pub fn settings_modal() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    // Local state for form fields to avoid global dispatch on every keystroke
    let local_state = use_state(|| store.settings.clone());
    let schema_inputs = use_state(Vec::<ModelSchemaInput>::new);

    // Reload the model schema on every provider/model change. Requests are
    // not cancelled: the last response to arrive wins. Schema lookup and
    // target auto-detection only run while this modal is open; everywhere
    // else the mapping keeps its last detected or saved value, with the
    // `prompt` fallback covering never-inspected models.
    {
        let local_state = local_state.clone();
        let schema_inputs = schema_inputs.clone();
        let provider = local_state.provider.clone();
        let model = local_state.model.clone();
        use_effect_with((provider, model), move |(provider, model)| {
            let provider = provider.clone();
            let model = model.clone();
            yew::platform::spawn_local(async move {
                match api::fetch_model_schema(&provider, &model).await {
                    Ok(schema) => {
                        let mut s = (*local_state).clone();
                        engine::apply_schema(&mut s, &schema.inputs);
                        local_state.set(s);
                        schema_inputs.set(schema.inputs);
                    }
                    Err(e) => {
                        // Empty set means no system-field auto-detection
                        tracing::warn!("Failed to load model schema: {:?}", e);
                        schema_inputs.set(Vec::new());
                    }
                }
            });
            || ()
        });
    }

    let on_submit = {
        let store = store.clone();
        let local_state = local_state.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            store.dispatch(Action::UpdateSettings((*local_state).clone()));
            store.dispatch(Action::CloseSettings);
        })
    };

    let on_cancel = {
        let store = store.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            store.dispatch(Action::CloseSettings);
        })
    };

    let on_overlay_click = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::CloseSettings))
    };

    let on_provider_change = {
        let local_state = local_state.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            let model = s.model.clone();
            engine::select_model(&mut s, select.value(), model);
            local_state.set(s);
        })
    };

    let on_model_input = {
        let local_state = local_state.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            let provider = s.provider.clone();
            engine::select_model(&mut s, provider, input.value());
            local_state.set(s);
        })
    };

    let on_mode_change = {
        let local_state = local_state.clone();
        let store = store.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mode = match select.value().as_str() {
                "agent" => AgentMode::Agent,
                "edit" => AgentMode::Edit,
                _ => AgentMode::Ask,
            };
            let mut s = (*local_state).clone();
            engine::switch_mode(&mut s, mode, &store.mode_prompts);
            local_state.set(s);
        })
    };

    let on_prompt_type_change = {
        let local_state = local_state.clone();
        let store = store.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let choice = match select.value().as_str() {
                "default" => PromptChoice::Default,
                "empty" => PromptChoice::Empty,
                _ => PromptChoice::Custom,
            };
            let mut s = (*local_state).clone();
            engine::select_prompt_type(&mut s, choice, &store.mode_prompts);
            local_state.set(s);
        })
    };

    let on_prompt_input = {
        let local_state = local_state.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            engine::edit_prompt(&mut s, textarea.value());
            local_state.set(s);
        })
    };

    let on_temperature_input = {
        let local_state = local_state.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Ok(val) = input.value().parse::<f32>() {
                let mut s = (*local_state).clone();
                s.temperature = val.clamp(0.0, 2.0);
                local_state.set(s);
            }
        })
    };

    let on_max_tokens_input = {
        let local_state = local_state.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Ok(val) = input.value().parse::<u32>() {
                let mut s = (*local_state).clone();
                s.max_tokens = val;
                local_state.set(s);
            }
        })
    };

    let on_top_p_input = {
        let local_state = local_state.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Ok(val) = input.value().parse::<f32>() {
                let mut s = (*local_state).clone();
                s.top_p = val;
                local_state.set(s);
            }
        })
    };

    let on_frequency_penalty_input = {
        let local_state = local_state.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Ok(val) = input.value().parse::<f32>() {
                let mut s = (*local_state).clone();
                s.frequency_penalty = val;
                local_state.set(s);
            }
        })
    };

    let on_presence_penalty_input = {
        let local_state = local_state.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Ok(val) = input.value().parse::<f32>() {
                let mut s = (*local_state).clone();
                s.presence_penalty = val;
                local_state.set(s);
            }
        })
    };

    let on_context_level_input = {
        let local_state = local_state.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Ok(val) = input.value().parse::<u8>() {
                let mut s = (*local_state).clone();
                s.context_level = val.min(5);
                local_state.set(s);
            }
        })
    };

    let on_system_target_change = {
        let local_state = local_state.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            engine::set_system_prompt_target(&mut s, select.value());
            local_state.set(s);
        })
    };

    let on_temperature_target_change = {
        let local_state = local_state.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            engine::set_temperature_target(&mut s, select.value());
            local_state.set(s);
        })
    };

    let on_max_tokens_target_change = {
        let local_state = local_state.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut s = (*local_state).clone();
            engine::set_max_tokens_target(&mut s, select.value());
            local_state.set(s);
        })
    };

    let on_additional_field_input = {
        let local_state = local_state.clone();
        Callback::from(move |(name, kind, raw): (String, SchemaInputKind, String)| {
            let mut s = (*local_state).clone();
            if raw.is_empty() {
                s.additional_fields.remove(&name);
            } else {
                let value = match kind {
                    SchemaInputKind::Number => raw
                        .parse::<f64>()
                        .map(serde_json::Value::from)
                        .unwrap_or(serde_json::Value::String(raw)),
                    SchemaInputKind::Boolean => serde_json::Value::Bool(raw == "true"),
                    _ => serde_json::Value::String(raw),
                };
                s.additional_fields.insert(name, value);
            }
            local_state.set(s);
        })
    };

    let prompt_kind = engine::classify(&local_state.system_prompt, &store.mode_prompts);
    let prompt_type_value = match prompt_kind {
        PromptKind::Empty => "empty",
        PromptKind::Default => "default",
        PromptKind::Custom => "custom",
    };

    let mode_value = match local_state.agent_mode {
        AgentMode::Agent => "agent",
        AgentMode::Edit => "edit",
        AgentMode::Ask => "ask",
    };

    let is_generation = engine::is_generation_model(&local_state.model);

    // Candidate system-prompt targets: the general prompt field plus every
    // textual field the schema declares
    let mut system_targets = vec![engine::PROMPT_FIELD.to_string()];
    for input in schema_inputs.iter() {
        if input.kind.is_textual() && !system_targets.contains(&input.name) {
            system_targets.push(input.name.clone());
        }
    }

    // Candidate temperature targets: the default name plus every numeric
    // field the schema declares
    let mut temperature_targets = vec!["temperature".to_string()];
    for input in schema_inputs.iter() {
        if input.kind == SchemaInputKind::Number && !temperature_targets.contains(&input.name) {
            temperature_targets.push(input.name.clone());
        }
    }

    let max_tokens_targets = engine::max_tokens_target_options(&local_state.provider);

    let standard_targets = [
        engine::PROMPT_FIELD.to_string(),
        local_state.field_mapping.system_prompt.clone(),
        local_state.field_mapping.temperature.clone(),
        local_state.field_mapping.max_tokens.clone(),
    ];
    let extra_inputs = schema_inputs
        .iter()
        .filter(|i| !standard_targets.contains(&i.name))
        .cloned()
        .collect::<Vec<_>>();

    html! {
        <div class="modal-overlay" onclick={on_overlay_click}>
            <div class="modal-content" onclick={|e: MouseEvent| e.stop_propagation()}>
                <div class="modal-header">
                    <h2 class="modal-title">{"Chat Settings"}</h2>
                    <button class="close-btn" onclick={on_cancel.clone()}>{"×"}</button>
                </div>

                <div class="modal-body">
                    <div class="form-grid-2">
                        <div class="form-group">
                            <label class="form-label">{"Provider"}</label>
                            <select class="form-select" onchange={on_provider_change}>
                                { for PROVIDERS.iter().map(|p| html! {
                                    <option value={*p} selected={local_state.provider == *p}>{*p}</option>
                                })}
                            </select>
                        </div>
                        <div class="form-group">
                            <label class="form-label">{"Model"}</label>
                            <input type="text" class="form-input"
                                value={local_state.model.clone()}
                                oninput={on_model_input}
                                placeholder="gpt-4o"
                            />
                        </div>
                    </div>

                    if is_generation {
                        <div class="form-hint">
                            {"Generation model: context and system instructions are disabled."}
                        </div>
                    }

                    <div class="form-group">
                        <label class="form-label">{"Agent Mode"}</label>
                        <select class="form-select" onchange={on_mode_change}>
                            <option value="agent" selected={mode_value == "agent"}>{"Agent — full workflow access"}</option>
                            <option value="edit" selected={mode_value == "edit"}>{"Edit — content-only edits"}</option>
                            <option value="ask" selected={mode_value == "ask"}>{"Ask — read-only"}</option>
                        </select>
                    </div>

                    <div class="form-group">
                        <label class="form-label">{"System Prompt"}</label>
                        <select class="form-select" onchange={on_prompt_type_change}>
                            <option value="default" selected={prompt_type_value == "default"}>{"Default for mode"}</option>
                            <option value="custom" selected={prompt_type_value == "custom"}>{"Custom"}</option>
                            <option value="empty" selected={prompt_type_value == "empty"}>{"None"}</option>
                        </select>
                        <textarea class="form-textarea" rows="4"
                            value={local_state.system_prompt.clone()}
                            oninput={on_prompt_input}
                            placeholder="System instructions for the model..."
                            disabled={is_generation}
                        />
                    </div>

                    <div class="form-group">
                        <label class="form-label">{format!("Context Level: {}", local_state.context_level)}</label>
                        <input type="range" class="form-range"
                            min="0" max="5"
                            value={local_state.context_level.to_string()}
                            oninput={on_context_level_input}
                            disabled={is_generation}
                        />
                    </div>

                    <details class="model-config-section">
                        <summary>{"Generation Parameters"}</summary>
                        <div class="model-config-content">
                            <div class="form-grid-2">
                                <div class="form-group">
                                    <label class="form-label">{"Temperature"}</label>
                                    <input type="number" class="form-input"
                                        step="0.1" min="0" max="2"
                                        value={local_state.temperature.to_string()}
                                        oninput={on_temperature_input}
                                    />
                                </div>
                                <div class="form-group">
                                    <label class="form-label">{"Max Tokens"}</label>
                                    <input type="number" class="form-input"
                                        min="1"
                                        value={local_state.max_tokens.to_string()}
                                        oninput={on_max_tokens_input}
                                    />
                                </div>
                            </div>

                            <div class="form-grid-2">
                                <div class="form-group">
                                    <label class="form-label">{"Top P"}</label>
                                    <input type="number" class="form-input"
                                        step="0.05" min="0" max="1"
                                        value={local_state.top_p.to_string()}
                                        oninput={on_top_p_input}
                                    />
                                </div>
                                <div class="form-group">
                                    <label class="form-label">{"Frequency / Presence Penalty"}</label>
                                    <div class="form-grid-2">
                                        <input type="number" class="form-input"
                                            step="0.1" min="-2" max="2"
                                            value={local_state.frequency_penalty.to_string()}
                                            oninput={on_frequency_penalty_input}
                                        />
                                        <input type="number" class="form-input"
                                            step="0.1" min="-2" max="2"
                                            value={local_state.presence_penalty.to_string()}
                                            oninput={on_presence_penalty_input}
                                        />
                                    </div>
                                </div>
                            </div>
                        </div>
                    </details>

                    <details class="field-mapping-section">
                        <summary>{"Field Mapping"}</summary>
                        <div class="model-config-content">
                            <div class="form-group">
                                <label class="form-label">{"System Prompt Field"}</label>
                                <select class="form-select" onchange={on_system_target_change}>
                                    { for system_targets.iter().map(|t| html! {
                                        <option value={t.clone()} selected={local_state.field_mapping.system_prompt == *t}>{t}</option>
                                    })}
                                </select>
                            </div>
                            <div class="form-group">
                                <label class="form-label">{"Temperature Field"}</label>
                                <select class="form-select" onchange={on_temperature_target_change}>
                                    { for temperature_targets.iter().map(|t| html! {
                                        <option value={t.clone()} selected={local_state.field_mapping.temperature == *t}>{t}</option>
                                    })}
                                </select>
                            </div>
                            <div class="form-group">
                                <label class="form-label">{"Max Tokens Field"}</label>
                                <select class="form-select" onchange={on_max_tokens_target_change}>
                                    { for max_tokens_targets.iter().map(|t| html! {
                                        <option value={*t} selected={local_state.field_mapping.max_tokens == *t}>{*t}</option>
                                    })}
                                </select>
                            </div>
                        </div>
                    </details>

                    if !extra_inputs.is_empty() {
                        <details class="additional-fields-section" open=true>
                            <summary>{"Model Fields"}</summary>
                            <div class="model-config-content">
                                { for extra_inputs.iter().map(|input| {
                                    let name = input.name.clone();
                                    let kind = input.kind;
                                    let on_change = on_additional_field_input.clone();
                                    let current = local_state
                                        .additional_fields
                                        .get(&input.name)
                                        .map(display_value)
                                        .unwrap_or_default();
                                    html! {
                                        <div class="form-group">
                                            <label class="form-label">
                                                {&input.name}
                                                if input.required {
                                                    <span class="required-mark">{" *"}</span>
                                                }
                                            </label>
                                            <input type="text" class="form-input"
                                                value={current}
                                                oninput={Callback::from(move |e: InputEvent| {
                                                    let i: web_sys::HtmlInputElement = e.target_unchecked_into();
                                                    on_change.emit((name.clone(), kind, i.value()));
                                                })}
                                            />
                                        </div>
                                    }
                                })}
                            </div>
                        </details>
                    }

                    <div class="form-actions">
                        <button class="btn btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
                        <button class="btn btn-primary" onclick={on_submit}>{"Save Settings"}</button>
                    </div>
                </div>
            </div>
        </div>
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
