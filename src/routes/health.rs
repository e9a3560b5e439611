use axum::Json;
use tracing::info;

use crate::message::HealthResponse;

pub async fn health_handler() -> Json<HealthResponse> {
    info!("health check");
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Chat widget API is up and running.".to_string(),
    })
}
