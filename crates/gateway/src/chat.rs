//! `POST /api/chat`: forward a message sequence to the upstream completion
//! API and relay whatever comes back.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, info};

use trellis_config::RoutesConfig;
use trellis_core::error::ProviderError;
use trellis_core::message::ChatPayload;
use trellis_core::provider::CompletionRequest;

use crate::SharedState;

/// Returned when no credential is configured. No upstream call is made.
pub const MISSING_KEY_MESSAGE: &str = "OpenAI API key not configured.";

/// Returned when the upstream fails without a message of its own.
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Failed to get response from OpenAI.";

/// The `purpose` value that selects [`Route::GraphLab`].
pub const GRAPH_LAB_PURPOSE: &str = "graph_lab";

/// Routing variant selected by the request's `purpose`.
///
/// Both variants currently resolve to the same request shape; each carries
/// its own model setting so they can diverge independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    GraphLab,
    General,
}

impl Route {
    pub fn from_purpose(purpose: Option<&str>) -> Self {
        match purpose {
            Some(GRAPH_LAB_PURPOSE) => Route::GraphLab,
            _ => Route::General,
        }
    }

    pub fn model<'a>(&self, routes: &'a RoutesConfig) -> &'a str {
        match self {
            Route::GraphLab => &routes.graph_lab.model,
            Route::General => &routes.general.model,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::GraphLab => "graph_lab",
            Route::General => "general",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Error envelope ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// `{ "error": { "message": ... } }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// A handler failure with the status it renders as.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Oversized bodies keep their 413; every other malformed body is a 400.
    fn from_rejection(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: rejection.body_text(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    fn from_upstream(err: &ProviderError) -> Self {
        Self::internal(err.upstream_message().unwrap_or(UPSTREAM_FALLBACK_MESSAGE))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

// ── Handler ───────────────────────────────────────────────────

pub(crate) async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(payload) = payload.map_err(ApiError::from_rejection)?;

    if payload.messages.is_empty() {
        return Err(ApiError::bad_request("messages must not be empty"));
    }

    let route = Route::from_purpose(payload.purpose.as_deref());
    let request_id = uuid::Uuid::new_v4();

    // One arm per route so each can grow its own request shape.
    let request = match route {
        Route::GraphLab => {
            let request = CompletionRequest {
                model: route.model(&state.config.routes).to_string(),
                messages: payload.messages,
            };
            info!(%request_id, route = %route, model = %request.model, "Routing to Graph Lab");
            request
        }
        Route::General => {
            let request = CompletionRequest {
                model: route.model(&state.config.routes).to_string(),
                messages: payload.messages,
            };
            info!(%request_id, route = %route, model = %request.model, "Routing to general chat");
            request
        }
    };

    let Some(api_key) = state.config.api_key() else {
        error!(%request_id, route = %route, "Upstream API key is not configured");
        return Err(ApiError::internal(MISSING_KEY_MESSAGE));
    };

    let result = state.provider.complete(api_key, &request).await;

    match result {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            error!(
                %request_id,
                route = %route,
                provider = %state.provider.name(),
                error = %e,
                "Upstream completion failed"
            );
            Err(ApiError::from_upstream(&e))
        }
    }
}
