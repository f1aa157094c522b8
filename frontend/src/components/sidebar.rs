use crate::api;
use crate::store::{Action, StoreContext};
use yew::prelude::*;

#[function_component(AgentSidebar)]
pub fn agent_sidebar() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    // Load agent presets and the canned mode prompts on mount
    {
        let store = store.clone();
        use_effect_with((), move |_| {
            yew::platform::spawn_local({
                let store = store.clone();
                async move {
                    match api::fetch_agents().await {
                        Ok(agents) => store.dispatch(Action::SetAgents(agents)),
                        Err(e) => store.dispatch(Action::SetError(Some(format!(
                            "Failed to load agents: {}",
                            e
                        )))),
                    }
                }
            });
            yew::platform::spawn_local(async move {
                // Best effort; the built-in prompts stay in place on failure
                match api::fetch_mode_prompts().await {
                    Ok(prompts) => store.dispatch(Action::SetModePrompts(prompts)),
                    Err(e) => tracing::warn!("Failed to load mode prompts: {:?}", e),
                }
            });
            || {}
        });
    }

    // Load or create the chat for the current selection, also on startup
    // when the previous selection was restored from LocalStorage
    {
        let store = store.clone();
        use_effect_with(store.active_agent_id, move |agent_id| {
            let agent_id = *agent_id;
            let store = store.clone();
            yew::platform::spawn_local(async move {
                let chats = api::fetch_chats(agent_id).await.unwrap_or_default();
                if let Some(chat) = chats.into_iter().next() {
                    store.dispatch(Action::SetChat(chat));
                } else {
                    match api::create_chat(agent_id).await {
                        Ok(chat) => store.dispatch(Action::SetChat(chat)),
                        Err(e) => store.dispatch(Action::SetError(Some(format!(
                            "Failed to open a chat: {}",
                            e
                        )))),
                    }
                }
            });
            || {}
        });
    }

    let on_select = {
        let store = store.clone();
        Callback::from(move |id: Option<uuid::Uuid>| {
            store.dispatch(Action::SelectAgent(id));
        })
    };

    let open_settings = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::OpenSettings))
    };

    html! {
        <div class="sidebar">
            <header>
                <div class="sidebar-header-content">
                    <h1 class="app-title">{"Flowdesk"}</h1>
                </div>
                <div class="sidebar-toolbar">
                    <button class="icon-btn" onclick={open_settings} title="Chat Settings">
                        <svg viewBox="0 0 24 24"><path d="M19.14 12.94c.04-.3.06-.61.06-.94 0-.32-.02-.64-.07-.94l2.03-1.58c.18-.14.23-.41.12-.61l-1.92-3.32c-.12-.22-.37-.29-.59-.22l-2.39.96c-.5-.38-1.03-.7-1.62-.94l-.36-2.54c-.04-.24-.24-.41-.48-.41h-3.84c-.24 0-.43.17-.47.41l-.36 2.54c-.59.24-1.13.57-1.62.94l-2.39-.96c-.22-.08-.47 0-.59.22L3.16 8.87c-.12.21-.08.47.12.61l2.03 1.58c-.05.3-.09.63-.09.94s.02.64.07.94l-2.03 1.58c-.18.14-.23.41-.12.61l1.92 3.32c.12.22.37.29.59.22l2.39-.96c.5.38 1.03.7 1.62.94l.36 2.54c.05.24.24.41.48.41h3.84c.24 0 .44-.17.47-.41l.36-2.54c.59-.24 1.13-.56 1.62-.94l2.39.96c.22.08.47 0 .59-.22l1.92-3.32c.12-.22.07-.47-.12-.61l-2.01-1.58zM12 15.6c-1.98 0-3.6-1.62-3.6-3.6s1.62-3.6 3.6-3.6 3.6 1.62 3.6 3.6-1.62 3.6-3.6 3.6z"></path></svg>
                    </button>
                </div>
            </header>

            <div class="section-label">
                {"Agents"}
            </div>

            <div class="agent-list">
                {
                    {
                        let on_click = on_select.clone();
                        let is_active = store.active_agent_id.is_none();
                        html! {
                            <div class={classes!("agent-item", if is_active { "active" } else { "" })} onclick={move |_| on_click.emit(None)}>
                                <div class="avatar bot">{"✦"}</div>
                                <div class="agent-info">
                                    <div class="agent-name">{"Assistant"}</div>
                                    <div class="agent-desc">{"Default settings, no preset"}</div>
                                </div>
                            </div>
                        }
                    }
                }
                { for store.agents.iter().map(|agent| {
                    let id = agent.id;
                    let on_click = on_select.clone();
                    let is_active = Some(id) == store.active_agent_id;

                    html! {
                        <div class={classes!("agent-item", if is_active { "active" } else { "" })} onclick={move |_| on_click.emit(Some(id))}>
                            <div class="avatar bot">{&agent.icon}</div>
                            <div class="agent-info">
                                <div class="agent-name">{&agent.title}</div>
                                <div class="agent-desc">{&agent.config.model}</div>
                            </div>
                        </div>
                    }
                })}
            </div>

            <div class="sidebar-footer">
                {"Flowdesk v0.1.0"}
            </div>
        </div>
    }
}
