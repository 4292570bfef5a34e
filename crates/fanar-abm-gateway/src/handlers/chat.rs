//! `POST /api/chat`: relay a conversation (or a single prompt) to the Fanar backend.

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::AppState;
use axum::{extract::State, Json};
use fanar_abm_core::{ChatMessage, ChatOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub options: Option<ChatOptions>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub ok: bool,
    pub response: String,
}

/// `messages` wins over `prompt`; a bare prompt becomes a single user turn.
pub async fn chat(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ChatBody>,
) -> Result<Json<ChatReply>, ApiError> {
    let messages = match (body.messages, body.prompt) {
        (Some(messages), _) => messages,
        (None, Some(prompt)) if !prompt.is_empty() => vec![ChatMessage::user(prompt)],
        _ => return Err(ApiError::Validation("messages or prompt required")),
    };
    let options = body.options.unwrap_or_default();

    let response = state.relay.send(&messages, &options).await?;
    Ok(Json(ChatReply { ok: true, response }))
}
