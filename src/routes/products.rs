use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::{
        categories::CategoryTree,
        products::{ProductDetail, ProductList, SearchResults},
    },
    error::AppResult,
    response::ApiResponse,
    routes::extract::{AppPath, AppQuery},
    routes::params::{CategoryParams, ListingParams, NewArrivalsParams, SearchParams},
    services::{category_service, product_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/best-sellers", get(best_sellers))
        .route("/featured", get(featured))
        .route("/new-arrivals", get(new_arrivals))
        .route("/search", get(search_products))
        .route("/categories", get(list_categories))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/products/best-sellers",
    params(
        ("limit" = Option<String>, Query, description = "Items to return, 1-50, default 8"),
        ("category" = Option<String>, Query, description = "Category slug"),
    ),
    responses(
        (status = 200, description = "Best-selling products", body = ApiResponse<ProductList>),
        (status = 400, description = "Invalid query parameter"),
    ),
    tag = "Products"
)]
pub async fn best_sellers(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListingParams>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::best_sellers(&state.orm, params).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/featured",
    params(
        ("limit" = Option<String>, Query, description = "Items to return, 1-50, default 8"),
        ("category" = Option<String>, Query, description = "Category slug"),
    ),
    responses(
        (status = 200, description = "Featured products", body = ApiResponse<ProductList>),
        (status = 400, description = "Invalid query parameter"),
    ),
    tag = "Products"
)]
pub async fn featured(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListingParams>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::featured(&state.orm, params).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/new-arrivals",
    params(
        ("category" = Option<String>, Query, description = "Category slug"),
        ("limit" = Option<String>, Query, description = "Items per page, 1-50, default 12"),
        ("page" = Option<String>, Query, description = "Page number, default 1"),
        ("sort" = Option<String>, Query, description = "createdAt, price, name, rating, popularity"),
        ("order" = Option<String>, Query, description = "asc or desc, default desc"),
    ),
    responses(
        (status = 200, description = "New arrivals", body = ApiResponse<ProductList>),
        (status = 400, description = "Invalid query parameter"),
    ),
    tag = "Products"
)]
pub async fn new_arrivals(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<NewArrivalsParams>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::new_arrivals(&state.orm, params).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/search",
    params(
        ("q" = Option<String>, Query, description = "Search term (or `search`)"),
        ("search" = Option<String>, Query, description = "Alias of q"),
        ("category" = Option<String>, Query, description = "Category slug"),
        ("sortBy" = Option<String>, Query, description = "relevance, price-asc, price-desc, newest, rating, popular"),
        ("minPrice" = Option<String>, Query, description = "Lower price bound"),
        ("maxPrice" = Option<String>, Query, description = "Upper price bound"),
        ("onSale" = Option<String>, Query, description = "Only discounted products"),
        ("isNew" = Option<String>, Query, description = "Only new arrivals"),
        ("freeShipping" = Option<String>, Query, description = "Only free shipping"),
        ("limit" = Option<String>, Query, description = "Items per page, 1-100, default 20"),
        ("page" = Option<String>, Query, description = "Page number, default 1"),
    ),
    responses(
        (status = 200, description = "Search results", body = ApiResponse<SearchResults>),
        (status = 400, description = "Missing or invalid query parameter"),
    ),
    tag = "Products"
)]
pub async fn search_products(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<ApiResponse<SearchResults>>> {
    let resp = product_service::search(&state.orm, state.analytics.as_ref(), params).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/categories",
    params(
        ("includeProductCount" = Option<String>, Query, description = "Include denormalized product counts"),
        ("includeSubCategories" = Option<String>, Query, description = "Nest sub-categories, default true"),
        ("status" = Option<String>, Query, description = "active, inactive or all; default active"),
    ),
    responses(
        (status = 200, description = "Category tree", body = ApiResponse<CategoryTree>),
        (status = 400, description = "Invalid query parameter"),
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CategoryParams>,
) -> AppResult<Json<ApiResponse<CategoryTree>>> {
    let resp = category_service::category_tree(&state.orm, params).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product UUID or slug")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = product_service::get_product(&state.orm, state.analytics.as_ref(), &id).await?;
    Ok(Json(resp))
}
