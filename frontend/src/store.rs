use gloo_storage::{LocalStorage, Storage};
use shared::engine;
use shared::models::*;
use std::rc::Rc;
use uuid::Uuid;
use yew::prelude::*;

const AGENT_STORAGE_KEY: &str = "flowdesk.agent";

#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub agents: Vec<AgentPreset>,
    pub active_agent_id: Option<Uuid>,
    pub active_chat: Option<Chat>,
    pub settings: ChatSettings,
    pub mode_prompts: ModePrompts,
    pub settings_open: bool,
    pub is_sending: bool,
    /// Chat whose persisted settings have been reloaded; autosave stays
    /// gated until this matches the active chat.
    pub settings_loaded_for: Option<Uuid>,
    pub error: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        let active_agent_id = LocalStorage::get(AGENT_STORAGE_KEY).ok();
        Self {
            agents: Vec::new(),
            active_agent_id,
            active_chat: None,
            settings: ChatSettings::default(),
            mode_prompts: ModePrompts::default(),
            settings_open: false,
            is_sending: false,
            settings_loaded_for: None,
            error: None,
        }
    }
}

pub enum Action {
    SetAgents(Vec<AgentPreset>),
    SelectAgent(Option<Uuid>),
    SetChat(Chat),
    /// Persisted settings reloaded for a reopened chat, applied verbatim.
    /// `None` means the chat has nothing stored yet; either way the chat is
    /// marked loaded so autosave may start writing.
    SettingsLoaded {
        chat_id: Uuid,
        settings: Option<ChatSettings>,
    },
    /// Settings-modal save.
    UpdateSettings(ChatSettings),
    SetModePrompts(ModePrompts),
    SwitchMode(AgentMode),
    AppendMessage(ChatMessage),
    UpdateMessageContent { message_id: Uuid, content: String },
    EditMessage { message_id: Uuid, content: String },
    DeleteMessage(Uuid),
    OpenSettings,
    CloseSettings,
    SetSending(bool),
    SetError(Option<String>),
}

impl Reducible for State {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            Action::SetAgents(agents) => {
                next.agents = agents;
            }
            Action::SelectAgent(id) => {
                next.active_agent_id = id;
                engine::select_agent(&mut next.settings, id, &next.agents);
                // Chat loading is handled by an effect watching the selection
                next.active_chat = None;
                match id {
                    Some(id) => {
                        let _ = LocalStorage::set(AGENT_STORAGE_KEY, id);
                    }
                    None => LocalStorage::delete(AGENT_STORAGE_KEY),
                }
            }
            Action::SetChat(chat) => {
                next.active_chat = Some(chat);
            }
            Action::SettingsLoaded { chat_id, settings } => {
                if let Some(settings) = settings {
                    next.settings = settings;
                }
                next.settings_loaded_for = Some(chat_id);
            }
            Action::UpdateSettings(settings) => {
                next.settings = settings;
            }
            Action::SetModePrompts(prompts) => {
                next.mode_prompts = prompts;
            }
            Action::SwitchMode(mode) => {
                engine::switch_mode(&mut next.settings, mode, &next.mode_prompts);
            }
            Action::AppendMessage(msg) => {
                if let Some(chat) = &mut next.active_chat {
                    chat.messages.push(msg);
                }
            }
            Action::UpdateMessageContent {
                message_id,
                content,
            } => {
                if let Some(chat) = &mut next.active_chat
                    && let Some(msg) = chat.messages.iter_mut().find(|m| m.id == message_id)
                {
                    msg.content = content;
                }
            }
            Action::EditMessage {
                message_id,
                content,
            } => {
                if let Some(chat) = &mut next.active_chat
                    && let Some(msg) = chat.messages.iter_mut().find(|m| m.id == message_id)
                {
                    msg.content = content;
                }
            }
            Action::DeleteMessage(message_id) => {
                if let Some(chat) = &mut next.active_chat {
                    chat.messages.retain(|m| m.id != message_id);
                }
            }
            Action::OpenSettings => {
                next.settings_open = true;
            }
            Action::CloseSettings => {
                next.settings_open = false;
            }
            Action::SetSending(sending) => {
                next.is_sending = sending;
            }
            Action::SetError(error) => {
                next.error = error;
            }
        }

        next.into()
    }
}

pub type StoreContext = UseReducerHandle<State>;

#[cfg(test)]
mod tests {
    use super::*;

    // Built literally so no browser storage is touched off-wasm.
    fn state() -> State {
        State {
            agents: Vec::new(),
            active_agent_id: None,
            active_chat: None,
            settings: ChatSettings::default(),
            mode_prompts: ModePrompts::default(),
            settings_open: false,
            is_sending: false,
            settings_loaded_for: None,
            error: None,
        }
    }

    #[test]
    fn autosave_gate_opens_only_after_settings_load() {
        let chat_id = Uuid::new_v4();
        let state = Rc::new(state());
        assert_eq!(state.settings_loaded_for, None);

        let mut stored = ChatSettings::default();
        stored.temperature = 1.2;
        stored.system_prompt = "persisted".to_string();
        let state = state.reduce(Action::SettingsLoaded {
            chat_id,
            settings: Some(stored.clone()),
        });

        assert_eq!(state.settings_loaded_for, Some(chat_id));
        assert_eq!(state.settings, stored);
    }

    #[test]
    fn chat_without_stored_settings_still_marks_loaded() {
        let chat_id = Uuid::new_v4();
        let before = ChatSettings::default();

        let state = Rc::new(state()).reduce(Action::SettingsLoaded {
            chat_id,
            settings: None,
        });

        assert_eq!(state.settings_loaded_for, Some(chat_id));
        assert_eq!(state.settings, before);
    }
}
