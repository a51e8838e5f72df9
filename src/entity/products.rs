use sea_orm::entity::prelude::*;

use crate::models::{Images, Tags, Variants};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: Option<String>,
    pub price: i64,
    pub compare_at_price: Option<i64>,
    pub category: String,
    pub subcategory: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub images: Images,
    #[sea_orm(column_type = "JsonBinary")]
    pub variants: Variants,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Tags,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_new_arrival: bool,
    pub is_best_seller: bool,
    pub is_on_sale: bool,
    pub free_shipping: bool,
    #[sea_orm(column_type = "Double")]
    pub average_rating: f64,
    pub review_count: i32,
    pub sales_count: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
