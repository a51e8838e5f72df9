use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_category: Option<String>,
    pub level: i32,
    pub path: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub show_in_navigation: bool,
    pub image_url: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub sub_categories: Vec<CategoryNode>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryTree {
    pub categories: Vec<CategoryNode>,
    pub total: u64,
}
