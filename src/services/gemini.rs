use std::{sync::OnceLock, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::{ContentRequest, GenerativeModel, ModelError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateReq<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResp {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    // Built on first use, from a worker thread. The blocking client must
    // not be constructed on an async runtime thread.
    http: OnceLock<reqwest::blocking::Client>,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
            timeout,
            http: OnceLock::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn http(&self) -> Result<&reqwest::blocking::Client, ModelError> {
        if let Some(client) = self.http.get() {
            return Ok(client);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        Ok(self.http.get_or_init(|| client))
    }
}

impl GenerativeModel for GeminiClient {
    fn generate_content(&self, request: &ContentRequest) -> Result<Option<String>, ModelError> {
        let body = build_body(request);
        debug!(model = %self.model, "calling gemini");

        let resp = self
            .http()?
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        extract_text(serde_json::from_str(&text)?)
    }
}

fn build_body(request: &ContentRequest) -> GenerateReq<'_> {
    GenerateReq {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: &request.system_instruction,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part {
                text: &request.user_turn,
            }],
        }],
    }
}

fn extract_text(resp: GenerateResp) -> Result<Option<String>, ModelError> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        return match resp.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(ModelError::Blocked(reason)),
            None => Ok(None),
        };
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    Ok(Some(text).filter(|t| !t.is_empty()))
}
