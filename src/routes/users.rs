use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::users::{ProductRef, RecentlyViewedList, UserProfile, WishlistView},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::extract::{AppJson, AppPath},
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/me/recently-viewed", post(record_recently_viewed))
        .route("/me/wishlist", post(add_to_wishlist))
        .route("/me/wishlist/{product_id}", delete(remove_from_wishlist))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user profile", body = ApiResponse<UserProfile>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No user for this identity"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let resp = user_service::me(&state.orm, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/users/me/recently-viewed",
    request_body = ProductRef,
    responses(
        (status = 200, description = "Updated recently viewed list", body = ApiResponse<RecentlyViewedList>),
        (status = 404, description = "Product or user not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn record_recently_viewed(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<ProductRef>,
) -> AppResult<Json<ApiResponse<RecentlyViewedList>>> {
    let resp = user_service::record_view(&state.orm, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/users/me/wishlist",
    request_body = ProductRef,
    responses(
        (status = 200, description = "Wishlist", body = ApiResponse<WishlistView>),
        (status = 404, description = "Product or user not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<ProductRef>,
) -> AppResult<Json<ApiResponse<WishlistView>>> {
    let resp = user_service::add_to_wishlist(&state.orm, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/users/me/wishlist/{product_id}",
    params(
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Wishlist", body = ApiResponse<WishlistView>),
        (status = 404, description = "Not in wishlist"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(product_id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<WishlistView>>> {
    let resp = user_service::remove_from_wishlist(&state.orm, &user, product_id).await?;
    Ok(Json(resp))
}
