use axum::{Json, Router, routing::get};
use uuid::Uuid;

use crate::{
    dto::client_errors::{ClientErrorReceipt, ClientErrorReport, ErrorSinkStatus},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    routes::extract::AppJson,
    state::AppState,
};

const MAX_FIELD_LENGTH: usize = 4096;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(error_sink_status).post(report_client_error))
}

#[utoipa::path(
    post,
    path = "/api/errors",
    request_body = ClientErrorReport,
    responses(
        (status = 200, description = "Report logged", body = ApiResponse<ClientErrorReceipt>),
        (status = 400, description = "Missing message"),
    ),
    tag = "Errors"
)]
pub async fn report_client_error(
    AppJson(report): AppJson<ClientErrorReport>,
) -> AppResult<Json<ApiResponse<ClientErrorReceipt>>> {
    let message = report.message.trim();
    if message.is_empty() {
        return Err(AppError::validation("message", "must not be empty"));
    }

    let id = Uuid::new_v4();
    tracing::warn!(
        report_id = %id,
        error_type = report.error_type.as_deref().unwrap_or("unknown"),
        url = report.url.as_deref().unwrap_or("-"),
        user_agent = report.user_agent.as_deref().unwrap_or("-"),
        client_timestamp = report.timestamp.as_deref().unwrap_or("-"),
        message = %clip(message),
        "client error reported"
    );
    if let Some(stack) = report.stack.as_deref() {
        tracing::debug!(report_id = %id, stack = %clip(stack), "client error stack");
    }
    if let Some(stack) = report.component_stack.as_deref() {
        tracing::debug!(report_id = %id, component_stack = %clip(stack), "client component stack");
    }

    Ok(Json(ApiResponse::success(
        "Error logged",
        ClientErrorReceipt { logged: true, id },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/errors",
    responses(
        (status = 200, description = "Error sink status", body = ApiResponse<ErrorSinkStatus>),
    ),
    tag = "Errors"
)]
pub async fn error_sink_status() -> Json<ApiResponse<ErrorSinkStatus>> {
    Json(ApiResponse::success(
        "Error logging endpoint",
        ErrorSinkStatus {
            status: "ok".to_string(),
        },
        Some(Meta::empty()),
    ))
}

fn clip(text: &str) -> &str {
    match text.char_indices().nth(MAX_FIELD_LENGTH) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
