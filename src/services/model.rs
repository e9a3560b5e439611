use std::sync::Arc;

use thiserror::Error;

/// One model invocation: the persona instructions plus a single user turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentRequest {
    pub system_instruction: Arc<str>,
    pub user_turn: String,
}

impl ContentRequest {
    pub fn new(system_instruction: Arc<str>, user_turn: impl Into<String>) -> Self {
        Self {
            system_instruction,
            user_turn: user_turn.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request to model failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode model response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("prompt was blocked by the model: {0}")]
    Blocked(String),
}

/// A generative-language backend. Calls block the current thread, so
/// callers on the async runtime go through `BlockingPool`.
///
/// `Ok(None)` means the backend answered but the response carried no text.
pub trait GenerativeModel: Send + Sync + 'static {
    fn generate_content(&self, request: &ContentRequest) -> Result<Option<String>, ModelError>;
}
