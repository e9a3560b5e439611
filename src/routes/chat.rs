use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;
use tracing::info;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::responder::ChatOutcome,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let payload = parse_chat_request(&body)?;

    // Trimmed only to detect an empty message; the model gets the text as sent.
    let outcome = match payload.message.as_deref() {
        Some(message) if !message.trim().is_empty() => {
            info!(%message, "received user message");
            state.responder.respond(message).await
        }
        _ => {
            tracing::warn!("received empty message");
            ChatOutcome::Guidance
        }
    };

    let kind = outcome.kind();
    let reply = outcome.into_reply();
    info!(outcome = kind, %reply, "sending reply");

    Ok(Json(ChatResponse { reply }))
}

/// An absent body or JSON `null` is an empty request; anything that is not
/// a JSON object with an optional string `message` is an error.
fn parse_chat_request(body: &[u8]) -> Result<ChatRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ChatRequest::default());
    }
    let value: Value = serde_json::from_slice(body)?;
    match value {
        Value::Null => Ok(ChatRequest::default()),
        value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
        other => Err(AppError::Internal(format!(
            "chat body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
