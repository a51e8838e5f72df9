use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::newsletter::{SubscribeRequest, SubscriptionConfirmation},
    error::AppResult,
    response::ApiResponse,
    services::newsletter_service,
    routes::extract::AppJson,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/subscribe", post(subscribe))
}

#[utoipa::path(
    post,
    path = "/api/newsletter/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscription confirmed", body = ApiResponse<SubscriptionConfirmation>),
        (status = 400, description = "Invalid email address"),
    ),
    tag = "Newsletter"
)]
pub async fn subscribe(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubscribeRequest>,
) -> AppResult<Json<ApiResponse<SubscriptionConfirmation>>> {
    let resp = newsletter_service::subscribe(state.analytics.as_ref(), payload)?;
    Ok(Json(resp))
}
