mod api;
mod components;
mod store;

use components::chat_panel::ChatPanel;
use components::settings_modal::SettingsModal;
use components::sidebar::AgentSidebar;
use store::{State, StoreContext};
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(State::default);

    html! {
        <ContextProvider<StoreContext> context={store.clone()}>
            <div class="app-container">
                <div class="sidebar-container">
                    <AgentSidebar />
                </div>
                <div class="main-stage">
                    <ChatPanel />
                </div>

                if store.settings_open {
                    <SettingsModal />
                }
            </div>
        </ContextProvider<StoreContext>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
