use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

use crate::{
    analytics::{AnalyticsEvent, AnalyticsSink},
    db::OrmConn,
    dto::products::{ProductDetail, ProductList, ProductSummary, SearchResults},
    entity::products::{Column, Entity as Products},
    error::{AppError, AppResult},
    query::ProductQuery,
    response::{ApiResponse, Meta},
    routes::params::{ListingParams, NewArrivalsParams, SearchParams},
    transform::{product_detail, product_summary},
};

const MAX_IDENTIFIER_LENGTH: usize = 200;

pub async fn best_sellers(
    db: &OrmConn,
    params: ListingParams,
) -> AppResult<ApiResponse<ProductList>> {
    let query = ProductQuery::best_sellers(&params)?;
    let products = fetch_window(db, &query).await?;
    let total = products.len() as u64;

    let meta = Meta::new(1, query.window.limit, total);
    Ok(ApiResponse::success(
        "Best sellers",
        ProductList { products, total },
        Some(meta),
    ))
}

pub async fn featured(db: &OrmConn, params: ListingParams) -> AppResult<ApiResponse<ProductList>> {
    let query = ProductQuery::featured(&params)?;
    let products = fetch_window(db, &query).await?;
    let total = products.len() as u64;

    let meta = Meta::new(1, query.window.limit, total);
    Ok(ApiResponse::success(
        "Featured products",
        ProductList { products, total },
        Some(meta),
    ))
}

pub async fn new_arrivals(
    db: &OrmConn,
    params: NewArrivalsParams,
) -> AppResult<ApiResponse<ProductList>> {
    let query = ProductQuery::new_arrivals(&params)?;
    let total = query.select().count(db).await?;
    let products = fetch_window(db, &query).await?;

    let meta = Meta::new(query.window.page, query.window.limit, total);
    Ok(ApiResponse::success(
        "New arrivals",
        ProductList { products, total },
        Some(meta),
    ))
}

pub async fn search(
    db: &OrmConn,
    analytics: &dyn AnalyticsSink,
    params: SearchParams,
) -> AppResult<ApiResponse<SearchResults>> {
    let query = ProductQuery::search(&params)?;
    let term = query.filter.text.clone().unwrap_or_default();

    let total = query.select().count(db).await?;
    let products = fetch_window(db, &query).await?;

    tracing::debug!(term = %term, total, "product search");
    analytics.track(&AnalyticsEvent::Search {
        term: term.clone(),
        results: total,
    });

    let meta = Meta::new(query.window.page, query.window.limit, total);
    Ok(ApiResponse::success(
        "Search results",
        SearchResults {
            products,
            total,
            query: term,
        },
        Some(meta),
    ))
}

/// Look up an active product by UUID or, failing that, by slug.
pub async fn get_product(
    db: &OrmConn,
    analytics: &dyn AnalyticsSink,
    id_or_slug: &str,
) -> AppResult<ApiResponse<ProductDetail>> {
    let identifier = id_or_slug.trim();
    if identifier.is_empty() || identifier.len() > MAX_IDENTIFIER_LENGTH {
        return Err(AppError::validation(
            "id",
            "expected a product id or slug",
        ));
    }

    let by_identifier = match Uuid::parse_str(identifier) {
        Ok(id) => Column::Id.eq(id),
        Err(_) => Column::Slug.eq(identifier.to_string()),
    };

    let product = Products::find()
        .filter(by_identifier)
        .filter(Column::IsActive.eq(true))
        .one(db)
        .await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::not_found("Product", identifier)),
    };

    analytics.track(&AnalyticsEvent::ViewItem {
        product_id: product.id.to_string(),
        category: product.category.clone(),
    });

    Ok(ApiResponse::success(
        "Product",
        product_detail(&product),
        Some(Meta::empty()),
    ))
}

pub async fn product_exists(db: &OrmConn, id: Uuid) -> AppResult<bool> {
    let found = Products::find_by_id(id)
        .filter(Column::IsActive.eq(true))
        .count(db)
        .await?;
    Ok(found > 0)
}

async fn fetch_window(db: &OrmConn, query: &ProductQuery) -> AppResult<Vec<ProductSummary>> {
    let rows = query
        .select()
        .limit(query.window.limit)
        .offset(query.window.skip)
        .all(db)
        .await?;
    Ok(rows.iter().map(product_summary).collect())
}
