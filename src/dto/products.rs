use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{ProductImage, ProductVariant};

/// Client-facing product card.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Minor currency units.
    pub price: i64,
    pub compare_at_price: Option<i64>,
    pub discount_percentage: Option<u32>,
    pub category: String,
    pub subcategory: Option<String>,
    pub image: String,
    pub images: Vec<ProductImage>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub in_stock: bool,
    pub total_inventory: i64,
    pub is_featured: bool,
    pub is_new_arrival: bool,
    pub is_best_seller: bool,
    pub is_on_sale: bool,
    pub free_shipping: bool,
    pub average_rating: f64,
    pub review_count: i32,
    pub sales_count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub summary: ProductSummary,
    pub variants: Vec<ProductVariant>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub products: Vec<ProductSummary>,
    pub total: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResults {
    pub products: Vec<ProductSummary>,
    pub total: u64,
    pub query: String,
}
