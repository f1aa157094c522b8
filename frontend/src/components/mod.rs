pub mod chat_panel;
pub mod markdown;
pub mod settings_modal;
pub mod sidebar;
