#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use clinic_chat_backend::config::Config;
use clinic_chat_backend::routes::create_router;
use clinic_chat_backend::services::model::{ContentRequest, GenerativeModel, ModelError};
use clinic_chat_backend::services::responder::Responder;
use clinic_chat_backend::services::worker_pool::BlockingPool;
use clinic_chat_backend::state::AppState;
use serde::de::DeserializeOwned;

pub const SECRET: &str = "secret123";
pub const ORIGIN: &str = "https://smilecare-dentals.vercel.app";

#[derive(Clone, Debug)]
pub enum Script {
    Reply(String),
    Empty,
    Fail,
}

/// In-process model double: records every request, optionally sleeps
/// (blocking the thread, like a real network call) before answering.
pub struct ScriptedModel {
    script: Script,
    delay: Duration,
    calls: AtomicUsize,
    seen: Mutex<Vec<ContentRequest>>,
}

impl ScriptedModel {
    pub fn new(script: Script) -> Arc<Self> {
        Self::with_delay(script, Duration::ZERO)
    }

    pub fn with_delay(script: Script, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            script,
            delay,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<ContentRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl GenerativeModel for ScriptedModel {
    fn generate_content(&self, request: &ContentRequest) -> Result<Option<String>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        match &self.script {
            Script::Reply(text) => Ok(Some(text.clone())),
            Script::Empty => Ok(Some(String::new())),
            Script::Fail => Err(ModelError::Status {
                status: 503,
                body: "backend unavailable".into(),
            }),
        }
    }
}

pub fn test_config(chat_api_key: Option<&str>) -> Config {
    Config {
        chat_api_key: chat_api_key.map(String::from),
        ..Config::default()
    }
}

pub fn app_with(config: Config, model: Option<Arc<ScriptedModel>>) -> Router {
    let pool = BlockingPool::new(config.model_workers, config.model_timeout);
    let model = model.map(|m| m as Arc<dyn GenerativeModel>);
    let state = AppState::new(config, Responder::new(model, pool)).shared();
    create_router(state)
}

pub fn app(model: Arc<ScriptedModel>) -> Router {
    app_with(test_config(Some(SECRET)), Some(model))
}

pub fn chat_request(key: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

/// In-memory sink for `tracing_subscriber::fmt` output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Captures every event emitted on the current thread until the guard drops.
/// Pair with a current-thread `#[tokio::test]`.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}
