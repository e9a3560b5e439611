use std::sync::Arc;

use thiserror::Error;
use tracing::{error, warn};

use super::model::{ContentRequest, GenerativeModel, ModelError};
use super::persona::{CLINIC_PHONE, PERSONA_PROMPT};
use super::worker_pool::{BlockingPool, PoolError};

pub const GUIDANCE_REPLY: &str = "Please type a message so I can help you.";
pub const EMPTY_RESPONSE_REPLY: &str =
    "Sorry, I got an unexpected response from the assistant. Please try again.";
pub const NOT_CONFIGURED_REPLY: &str =
    "Sorry, there is an internal configuration issue. Please contact the clinic.";

pub fn dependency_failure_reply() -> String {
    format!(
        "Sorry, there was a problem reaching the assistant. Please try again or call the clinic at {CLINIC_PHONE}."
    )
}

#[derive(Debug, Error)]
pub enum ResponderError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Result of one chat turn. Every variant maps to a reply string; none of
/// them is an HTTP error.
#[derive(Debug)]
pub enum ChatOutcome {
    /// The user sent nothing to answer.
    Guidance,
    Answered(String),
    /// The model answered without any text.
    EmptyResponse,
    /// No model credential is configured.
    NotConfigured,
    DependencyFailure(ResponderError),
}

impl ChatOutcome {
    pub fn into_reply(self) -> String {
        match self {
            ChatOutcome::Guidance => GUIDANCE_REPLY.to_string(),
            ChatOutcome::Answered(text) => text,
            ChatOutcome::EmptyResponse => EMPTY_RESPONSE_REPLY.to_string(),
            ChatOutcome::NotConfigured => NOT_CONFIGURED_REPLY.to_string(),
            ChatOutcome::DependencyFailure(_) => dependency_failure_reply(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChatOutcome::Guidance => "guidance",
            ChatOutcome::Answered(_) => "answered",
            ChatOutcome::EmptyResponse => "empty_response",
            ChatOutcome::NotConfigured => "not_configured",
            ChatOutcome::DependencyFailure(_) => "dependency_failure",
        }
    }
}

/// Turns user text into a reply by way of the generative model, keeping
/// the model's latency on the blocking pool and its failures out of the
/// HTTP layer.
#[derive(Clone)]
pub struct Responder {
    model: Option<Arc<dyn GenerativeModel>>,
    persona: Arc<str>,
    pool: BlockingPool,
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("model_configured", &self.model.is_some())
            .field("pool", &self.pool)
            .finish()
    }
}

impl Responder {
    pub fn new(model: Option<Arc<dyn GenerativeModel>>, pool: BlockingPool) -> Self {
        Self {
            model,
            persona: Arc::from(PERSONA_PROMPT),
            pool,
        }
    }

    pub fn with_persona(mut self, persona: impl Into<Arc<str>>) -> Self {
        self.persona = persona.into();
        self
    }

    /// `user_text` must contain something besides whitespace. It is sent
    /// to the model unchanged.
    pub async fn respond(&self, user_text: &str) -> ChatOutcome {
        let Some(model) = self.model.clone() else {
            error!("GEMINI_API_KEY is not set; cannot call the model");
            return ChatOutcome::NotConfigured;
        };

        let request = ContentRequest::new(self.persona.clone(), user_text);
        let result = self
            .pool
            .run(move || model.generate_content(&request))
            .await;

        match result {
            Ok(Ok(Some(text))) if !text.trim().is_empty() => {
                ChatOutcome::Answered(text.trim().to_string())
            }
            Ok(Ok(_)) => {
                warn!("model response contained no text");
                ChatOutcome::EmptyResponse
            }
            Ok(Err(e)) => {
                error!(error = ?e, "model call failed");
                ChatOutcome::DependencyFailure(e.into())
            }
            Err(e) => {
                error!(error = ?e, "model call did not complete");
                ChatOutcome::DependencyFailure(e.into())
            }
        }
    }
}
