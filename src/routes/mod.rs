use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode, Uri, header},
    routing::get,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod client_errors;
pub mod content;
pub mod doc;
pub mod extract;
pub mod health;
pub mod newsletter;
pub mod params;
pub mod products;
pub mod users;

const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router(enable_auth: bool) -> Router<AppState> {
    let router = Router::new()
        .nest("/products", products::router())
        .nest("/content", content::router())
        .nest("/newsletter", newsletter::router())
        .nest("/errors", client_errors::router());

    if enable_auth {
        router.nest("/users", users::router())
    } else {
        router
    }
}

/// The full application minus transport layers (tracing, request ids, limits).
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.site_url);
    let api_router = create_api_router(state.config.enable_auth);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_router)
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

pub fn cors_layer(site_url: &str) -> CorsLayer {
    let origin = match HeaderValue::from_str(site_url.trim_end_matches('/')) {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => {
            tracing::warn!(site_url = %site_url, "site url is not a valid origin, allowing any");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(86_400))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
