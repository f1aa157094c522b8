use gloo_net::http::Request;
use shared::models::*;
use uuid::Uuid;

const API_BASE: &str = "/api";

pub async fn fetch_agents() -> Result<Vec<AgentPreset>, gloo_net::Error> {
    Request::get(&format!("{}/agents", API_BASE))
        .send()
        .await?
        .json()
        .await
}

/// The three canned mode prompts from the prompt-preset library.
pub async fn fetch_mode_prompts() -> Result<ModePrompts, gloo_net::Error> {
    Request::get(&format!("{}/prompt-presets/modes", API_BASE))
        .send()
        .await?
        .json()
        .await
}

pub async fn fetch_chats(agent_id: Option<Uuid>) -> Result<Vec<Chat>, gloo_net::Error> {
    let url = match agent_id {
        Some(id) => format!("{}/chats?agent_id={}", API_BASE, id),
        None => format!("{}/chats", API_BASE),
    };
    Request::get(&url).send().await?.json().await
}

pub async fn create_chat(agent_id: Option<Uuid>) -> Result<Chat, gloo_net::Error> {
    Request::post(&format!("{}/chats", API_BASE))
        .json(&CreateChatRequest { agent_id })?
        .send()
        .await?
        .json()
        .await
}

pub async fn delete_chat(chat_id: Uuid) -> Result<(), gloo_net::Error> {
    Request::delete(&format!("{}/chats/{}", API_BASE, chat_id))
        .send()
        .await?;
    Ok(())
}

pub async fn get_chat_settings(chat_id: Uuid) -> Result<ChatSettings, gloo_net::Error> {
    Request::get(&format!("{}/chats/{}/settings", API_BASE, chat_id))
        .send()
        .await?
        .json()
        .await
}

pub async fn save_chat_settings(
    chat_id: Uuid,
    settings: &ChatSettings,
) -> Result<(), gloo_net::Error> {
    Request::post(&format!("{}/chats/{}/settings", API_BASE, chat_id))
        .json(settings)?
        .send()
        .await?;
    Ok(())
}

pub async fn edit_message(
    chat_id: Uuid,
    message_id: Uuid,
    content: String,
) -> Result<(), gloo_net::Error> {
    Request::put(&format!(
        "{}/chats/{}/messages/{}",
        API_BASE, chat_id, message_id
    ))
    .json(&EditMessageRequest { content })?
    .send()
    .await?;
    Ok(())
}

pub async fn delete_message(chat_id: Uuid, message_id: Uuid) -> Result<(), gloo_net::Error> {
    Request::delete(&format!(
        "{}/chats/{}/messages/{}",
        API_BASE, chat_id, message_id
    ))
    .send()
    .await?;
    Ok(())
}

/// Declared input fields of a remote model. Triggered on every
/// provider/model change; callers fall back to an empty set on failure.
pub async fn fetch_model_schema(
    provider: &str,
    model: &str,
) -> Result<ModelSchemaResponse, gloo_net::Error> {
    Request::get(&format!(
        "{}/models/{}/{}/schema",
        API_BASE, provider, model
    ))
    .send()
    .await?
    .json()
    .await
}

pub async fn upload_attachment(file: web_sys::File) -> Result<(), gloo_net::Error> {
    let form_data = web_sys::FormData::new()
        .map_err(|_| gloo_net::Error::GlooError("Failed to create FormData".to_string()))?;
    form_data
        .append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|_| gloo_net::Error::GlooError("Failed to append file to FormData".to_string()))?;

    Request::post(&format!("{}/uploads", API_BASE))
        .body(form_data)?
        .send()
        .await?;
    Ok(())
}
