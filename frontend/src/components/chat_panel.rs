use crate::api;
use crate::store::{Action, StoreContext};
use futures::StreamExt;
use gloo_net::http::Request;
use shared::engine;
use shared::models::{AgentMode, ChatMessage, ChatSendRequest, ROLE_ASSISTANT, ROLE_USER};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlSelectElement, HtmlTextAreaElement, js_sys};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MessageBubbleProps {
    pub message: ChatMessage,
    pub agent_title: String,
    pub is_sending: bool,
}

#[function_component(MessageBubble)]
pub fn message_bubble(props: &MessageBubbleProps) -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let is_editing = use_state(|| false);
    let edit_content = use_state(|| props.message.content.clone());
    let is_hovered = use_state(|| false);

    let is_user = props.message.role == ROLE_USER;
    let name = if is_user {
        "You".to_string()
    } else {
        props.agent_title.clone()
    };

    let on_mouse_enter = {
        let is_hovered = is_hovered.clone();
        Callback::from(move |_: MouseEvent| is_hovered.set(true))
    };

    let on_mouse_leave = {
        let is_hovered = is_hovered.clone();
        Callback::from(move |_: MouseEvent| is_hovered.set(false))
    };

    let on_edit_click = {
        let is_editing = is_editing.clone();
        let edit_content = edit_content.clone();
        let content = props.message.content.clone();
        Callback::from(move |_: MouseEvent| {
            edit_content.set(content.clone());
            is_editing.set(true);
        })
    };

    let on_edit_change = {
        let edit_content = edit_content.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(textarea) = e.target_dyn_into::<HtmlTextAreaElement>() {
                edit_content.set(textarea.value());
            }
        })
    };

    let on_edit_save = {
        let is_editing = is_editing.clone();
        let edit_content = edit_content.clone();
        let store = store.clone();
        let message_id = props.message.id;
        Callback::from(move |_: MouseEvent| {
            let content = (*edit_content).clone();
            store.dispatch(Action::EditMessage {
                message_id,
                content: content.clone(),
            });
            is_editing.set(false);

            let store = store.clone();
            let chat_id = store.active_chat.as_ref().map(|c| c.id);
            if let Some(chat_id) = chat_id {
                yew::platform::spawn_local(async move {
                    if let Err(e) = api::edit_message(chat_id, message_id, content).await {
                        tracing::error!("Failed to edit message: {:?}", e);
                    }
                });
            }
        })
    };

    let on_edit_cancel = {
        let is_editing = is_editing.clone();
        Callback::from(move |_: MouseEvent| {
            is_editing.set(false);
        })
    };

    let on_delete = {
        let store = store.clone();
        let message_id = props.message.id;
        Callback::from(move |_: MouseEvent| {
            store.dispatch(Action::DeleteMessage(message_id));

            let store = store.clone();
            let chat_id = store.active_chat.as_ref().map(|c| c.id);
            if let Some(chat_id) = chat_id {
                yew::platform::spawn_local(async move {
                    if let Err(e) = api::delete_message(chat_id, message_id).await {
                        tracing::error!("Failed to delete message: {:?}", e);
                    }
                });
            }
        })
    };

    let on_copy = {
        let content = props.message.content.clone();
        Callback::from(move |_: MouseEvent| {
            let content = content.clone();
            yew::platform::spawn_local(async move {
                if let Some(window) = web_sys::window() {
                    let clipboard = window.navigator().clipboard();
                    let promise = clipboard.write_text(&content);
                    let _ = JsFuture::from(promise).await;
                }
            });
        })
    };

    let show_actions = *is_hovered && !*is_editing && !props.is_sending;

    html! {
        <div
            class={classes!("message", if is_user { "message-user" } else { "message-assistant" })}
            onmouseenter={on_mouse_enter}
            onmouseleave={on_mouse_leave}
        >
            if !is_user {
                <div class="avatar bot" title={name.clone()}>
                    {name.chars().next().unwrap_or('?')}
                </div>
            }
            <div class="message-content">
                <div class="message-role">{&name}</div>

                if *is_editing {
                    <div class="message-edit-container">
                        <textarea
                            class="message-edit-textarea"
                            value={(*edit_content).clone()}
                            oninput={on_edit_change}
                        />
                        <div class="message-edit-actions">
                            <button class="btn btn-primary btn-sm" onclick={on_edit_save}>{"Save"}</button>
                            <button class="btn btn-secondary btn-sm" onclick={on_edit_cancel}>{"Cancel"}</button>
                        </div>
                    </div>
                } else {
                    <div class="message-text">
                        <super::markdown::Markdown content={props.message.content.clone()} />
                    </div>
                }

                if show_actions {
                    <div class="message-actions">
                        <button class="message-action-btn" onclick={on_copy} title="Copy">
                            <svg viewBox="0 0 24 24" width="16" height="16" fill="currentColor">
                                <path d="M16 1H4c-1.1 0-2 .9-2 2v14h2V3h12V1zm3 4H8c-1.1 0-2 .9-2 2v14c0 1.1.9 2 2 2h11c1.1 0 2-.9 2-2V7c0-1.1-.9-2-2-2zm0 16H8V7h11v14z"/>
                            </svg>
                        </button>
                        <button class="message-action-btn" onclick={on_edit_click} title="Edit">
                            <svg viewBox="0 0 24 24" width="16" height="16" fill="currentColor">
                                <path d="M3 17.25V21h3.75L17.81 9.94l-3.75-3.75L3 17.25zM20.71 7.04c.39-.39.39-1.02 0-1.41l-2.34-2.34c-.39-.39-1.02-.39-1.41 0l-1.83 1.83 3.75 3.75 1.83-1.83z"/>
                            </svg>
                        </button>
                        <button class="message-action-btn message-action-btn-danger" onclick={on_delete} title="Delete">
                            <svg viewBox="0 0 24 24" width="16" height="16" fill="currentColor">
                                <path d="M6 19c0 1.1.9 2 2 2h8c1.1 0 2-.9 2-2V7H6v12zM19 4h-3.5l-1-1h-5l-1 1H5v2h14V4z"/>
                            </svg>
                        </button>
                    </div>
                }
            </div>
        </div>
    }
}

#[function_component(ChatPanel)]
pub fn chat_panel() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let input_ref = use_node_ref();
    let container_ref = use_node_ref();

    let chat_id = store.active_chat.as_ref().map(|c| c.id);

    // Reapply the persisted settings verbatim whenever a chat is opened
    {
        let store = store.clone();
        use_effect_with(chat_id, move |chat_id| {
            if let Some(chat_id) = *chat_id {
                yew::platform::spawn_local(async move {
                    match api::get_chat_settings(chat_id).await {
                        Ok(settings) => store.dispatch(Action::SettingsLoaded {
                            chat_id,
                            settings: Some(settings),
                        }),
                        // New chats have nothing persisted yet; keep the
                        // current settings and let the autosave write them
                        Err(e) => {
                            tracing::warn!("No stored settings for chat: {:?}", e);
                            store.dispatch(Action::SettingsLoaded {
                                chat_id,
                                settings: None,
                            });
                        }
                    }
                });
            }
            || {}
        });
    }

    // Persist settings per chat on every mutation (modal save, agent
    // selection, mode switch). Gated until this chat's stored settings have
    // come back, so the pre-load state never overwrites them.
    {
        let settings = store.settings.clone();
        let loaded_for = store.settings_loaded_for;
        use_effect_with((chat_id, settings), move |(chat_id, settings)| {
            if let Some(chat_id) = *chat_id
                && loaded_for == Some(chat_id)
            {
                let settings = settings.clone();
                yew::platform::spawn_local(async move {
                    if let Err(e) = api::save_chat_settings(chat_id, &settings).await {
                        tracing::warn!("Failed to save chat settings: {:?}", e);
                    }
                });
            }
            || {}
        });
    }

    // Auto-scroll on message change
    {
        let container_ref = container_ref.clone();
        let messages_len = store
            .active_chat
            .as_ref()
            .map(|c| c.messages.len())
            .unwrap_or(0);
        use_effect_with(messages_len, move |_| {
            if let Some(div) = container_ref.cast::<Element>() {
                div.set_scroll_top(div.scroll_height());
            }
            || {}
        });
    }

    let on_mode_change = {
        let store = store.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mode = match select.value().as_str() {
                "agent" => AgentMode::Agent,
                "edit" => AgentMode::Edit,
                _ => AgentMode::Ask,
            };
            store.dispatch(Action::SwitchMode(mode));
        })
    };

    let on_send = {
        let store = store.clone();
        let input_ref = input_ref.clone();

        Callback::from(move |_| {
            let Some(input) = input_ref.cast::<HtmlTextAreaElement>() else {
                return;
            };
            let text = input.value().trim().to_string();

            if text.is_empty() || store.is_sending || store.active_chat.is_none() {
                return;
            }

            input.set_value("");

            let chat_id = store.active_chat.as_ref().map(|c| c.id).unwrap_or_default();
            let request = engine::build_send_request(&store.settings, text.clone());

            store.dispatch(Action::SetError(None));
            store.dispatch(Action::AppendMessage(ChatMessage::new(ROLE_USER, text)));

            let assistant_msg = ChatMessage::new(ROLE_ASSISTANT, "");
            let assistant_msg_id = assistant_msg.id;
            store.dispatch(Action::AppendMessage(assistant_msg));
            store.dispatch(Action::SetSending(true));

            let store = store.clone();
            yew::platform::spawn_local(async move {
                process_send_stream(store, chat_id, request, assistant_msg_id).await;
            });
        })
    };

    let on_keydown = {
        let on_send = on_send.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" && !e.shift_key() {
                e.prevent_default();
                on_send.emit(());
            }
        })
    };

    let on_new_chat = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| {
            let store = store.clone();
            let chat_id = store.active_chat.as_ref().map(|c| c.id);
            let agent_id = store.active_agent_id;
            yew::platform::spawn_local(async move {
                if let Some(chat_id) = chat_id
                    && let Err(e) = api::delete_chat(chat_id).await
                {
                    tracing::error!("Failed to delete chat: {:?}", e);
                }
                match api::create_chat(agent_id).await {
                    Ok(chat) => store.dispatch(Action::SetChat(chat)),
                    Err(e) => store.dispatch(Action::SetError(Some(format!(
                        "Failed to open a chat: {}",
                        e
                    )))),
                }
            });
        })
    };

    let on_attach = {
        let store = store.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Some(files) = input.files()
                && let Some(file) = files.get(0)
            {
                let store = store.clone();
                yew::platform::spawn_local(async move {
                    if let Err(e) = api::upload_attachment(file).await {
                        store.dispatch(Action::SetError(Some(format!("Upload failed: {}", e))));
                    }
                });
            }
        })
    };

    let agent_title = store
        .agents
        .iter()
        .find(|a| Some(a.id) == store.active_agent_id)
        .map(|a| a.title.clone())
        .unwrap_or("Assistant".to_string());

    let mode_value = match store.settings.agent_mode {
        AgentMode::Agent => "agent",
        AgentMode::Edit => "edit",
        AgentMode::Ask => "ask",
    };

    html! {
        <div class="main-stage">
            if store.active_chat.is_some() {
                <div class="chat-header">
                    <div class="chat-title">{&agent_title}</div>
                    <div class="chat-header-controls">
                        <span class="chat-model-badge">{&store.settings.model}</span>
                        <select class="mode-select" onchange={on_mode_change}>
                            <option value="agent" selected={mode_value == "agent"}>{"Agent"}</option>
                            <option value="edit" selected={mode_value == "edit"}>{"Edit"}</option>
                            <option value="ask" selected={mode_value == "ask"}>{"Ask"}</option>
                        </select>
                        <button class="icon-btn" onclick={on_new_chat} title="New chat">
                            <svg viewBox="0 0 24 24" width="18" height="18" fill="currentColor"><path d="M19 13h-6v6h-2v-6H5v-2h6V5h2v6h6v2z"/></svg>
                        </button>
                    </div>
                </div>
            }

            if let Some(error) = &store.error {
                <div class="error-banner">
                    {error}
                </div>
            }

            <div class={classes!("chat-message-list")} ref={container_ref}>
                if store.active_chat.is_none() {
                    <div class="chat-placeholder">
                        <div class="chat-placeholder-icon">{"✨"}</div>
                        <div>{"Select an agent to start chatting"}</div>
                    </div>
                } else {
                    { for store.active_chat.as_ref().unwrap().messages.iter().map(|msg| {
                        html! {
                            <MessageBubble
                                message={msg.clone()}
                                agent_title={agent_title.clone()}
                                is_sending={store.is_sending}
                            />
                        }
                    })}

                    if store.is_sending {
                        <div class="typing-indicator">
                            <span></span>
                            <span></span>
                            <span></span>
                        </div>
                    }
                }
            </div>

            <div class="input-area">
                <div class="input-box">
                    <label class="icon-btn" title="Attach file">
                        <input type="file" style="display: none;" onchange={on_attach} />
                        <svg viewBox="0 0 24 24" width="18" height="18" fill="currentColor"><path d="M16.5 6v11.5c0 2.21-1.79 4-4 4s-4-1.79-4-4V5c0-1.38 1.12-2.5 2.5-2.5s2.5 1.12 2.5 2.5v10.5c0 .55-.45 1-1 1s-1-.45-1-1V6H10v9.5c0 1.38 1.12 2.5 2.5 2.5s2.5-1.12 2.5-2.5V5c0-2.21-1.79-4-4-4S7 2.79 7 5v12.5c0 3.04 2.46 5.5 5.5 5.5s5.5-2.46 5.5-5.5V6h-1.5z"/></svg>
                    </label>
                    <textarea
                        class="chat-input"
                        ref={input_ref}
                        placeholder={"Type a message..."}
                        onkeydown={on_keydown}
                    />
                    <button class="send-btn" onclick={move |_| on_send.emit(())} disabled={store.is_sending}>
                         <svg viewBox="0 0 24 24" width="20" height="20" fill="currentColor"><path d="M2.01 21L23 12 2.01 3 2 10l15 2-15 2z"></path></svg>
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Send the assembled payload and stream the assistant's reply into the
/// placeholder message.
async fn process_send_stream(
    store: StoreContext,
    chat_id: uuid::Uuid,
    payload: ChatSendRequest,
    message_id: uuid::Uuid,
) {
    let req = match Request::post(&format!("/api/chats/{}/messages", chat_id)).json(&payload) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!("Failed to create request: {:?}", e);
            store.dispatch(Action::SetError(Some(format!("Failed to send: {}", e))));
            store.dispatch(Action::SetSending(false));
            return;
        }
    };

    let resp = match req.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!("Failed to send request: {:?}", e);
            store.dispatch(Action::SetError(Some(format!("Failed to send: {}", e))));
            store.dispatch(Action::SetSending(false));
            return;
        }
    };

    if let Some(body) = resp.body() {
        let mut stream = wasm_streams::ReadableStream::from_raw(body).into_stream();
        let mut full_response = String::new();
        let mut buffer = Vec::new();

        while let Some(result) = stream.next().await {
            let chunk = match result {
                Ok(chunk) => chunk,
                Err(e) => {
                    tracing::error!("Stream error: {:?}", e);
                    break;
                }
            };

            let bytes = js_sys::Uint8Array::new(&chunk).to_vec();
            buffer.extend_from_slice(&bytes);

            while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
                let line_bytes = buffer.drain(..pos + 1).collect::<Vec<u8>>();
                let line = String::from_utf8_lossy(&line_bytes);
                let line = line.trim_end_matches(['\n', '\r']);

                if line.is_empty() {
                    continue;
                }

                if let Some(data) = line.strip_prefix("data: ") {
                    if data == "[DONE]" {
                        break;
                    }
                    if data.starts_with("[ERROR]") {
                        tracing::error!("Backend error in stream: {}", data);
                        store.dispatch(Action::SetError(Some(
                            "The AI backend reported an error.".to_string(),
                        )));
                        break;
                    }
                    full_response.push_str(data);
                    store.dispatch(Action::UpdateMessageContent {
                        message_id,
                        content: full_response.clone(),
                    });
                }
            }
        }
    }

    store.dispatch(Action::SetSending(false));
}
