use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: Option<String>,
    /// Slug of the parent category; not enforced by a foreign key.
    pub parent_category: Option<String>,
    pub level: i32,
    pub path: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub show_in_navigation: bool,
    pub image_url: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    /// Denormalized; refreshed by the reconciliation job.
    pub product_count: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
