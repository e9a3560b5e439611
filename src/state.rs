// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::responder::Responder;

pub type SharedState = Arc<AppState>;

/// Read-only after startup; handlers share it without locking.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub responder: Responder,
}

impl AppState {
    pub fn new(config: Config, responder: Responder) -> Self {
        Self { config, responder }
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}
