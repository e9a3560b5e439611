// src/routes/mod.rs
pub mod chat;
pub mod health;

use crate::{error::AppError, message::ErrorResponse, state::SharedState};
use axum::{
    Json, Router,
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chat::chat_handler;
use health::health_handler;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info_span, warn};
use uuid::Uuid;

pub const API_KEY_HEADER: &str = "x-api-key";

pub fn create_router(state: SharedState) -> Router {
    let chat_routes = Router::new()
        .route("/api/chat", post(chat_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/", get(health_handler))
        .merge(chat_routes)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                info_span!(
                    "http",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
}

/// Exact-match origin list. Credentials are allowed, so methods and headers
/// are mirrored from the preflight instead of answered with `*`.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring origin that is not a valid header value");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

async fn auth_middleware(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // API Key check, before the body is read.
    let expected = state.config.chat_api_key.as_deref();
    let supplied = req.headers().get(API_KEY_HEADER);

    let authorized = match (expected, supplied) {
        (Some(expected), Some(val)) => val.as_bytes() == expected.as_bytes(),
        _ => false,
    };
    if authorized {
        return Ok(next.run(req).await);
    }

    let supplied = supplied.map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    warn!(
        supplied = supplied.as_deref().unwrap_or("<missing>"),
        key_configured = expected.is_some(),
        "unauthorized chat attempt"
    );
    Err(AppError::Unauthorized(
        "Invalid or missing API key".to_string(),
    ))
}

fn panic_response(_: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            detail: crate::error::INTERNAL_ERROR_DETAIL.to_string(),
        }),
    )
        .into_response()
}
