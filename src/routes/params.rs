//! Raw query-string parameters. Values stay strings here and are validated by
//! [`crate::query`] so every rejection uses the same error shape.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub limit: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewArrivalsParams {
    pub category: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub on_sale: Option<String>,
    pub is_new: Option<String>,
    pub free_shipping: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryParams {
    pub include_product_count: Option<String>,
    pub include_sub_categories: Option<String>,
    pub status: Option<String>,
}
