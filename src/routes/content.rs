use axum::{Json, Router, extract::State, routing::get};

use crate::{
    content::{AboutContent, HeroContent},
    response::ApiResponse,
    services::content_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hero", get(hero))
        .route("/about", get(about))
}

#[utoipa::path(
    get,
    path = "/api/content/hero",
    responses(
        (status = 200, description = "Hero banner; meta.source tells whether the CMS or the fallback answered", body = ApiResponse<HeroContent>),
    ),
    tag = "Content"
)]
pub async fn hero(State(state): State<AppState>) -> Json<ApiResponse<HeroContent>> {
    Json(content_service::hero(&state.cms).await)
}

#[utoipa::path(
    get,
    path = "/api/content/about",
    responses(
        (status = 200, description = "About page copy; meta.source tells whether the CMS or the fallback answered", body = ApiResponse<AboutContent>),
    ),
    tag = "Content"
)]
pub async fn about(State(state): State<AppState>) -> Json<ApiResponse<AboutContent>> {
    Json(content_service::about(&state.cms).await)
}
