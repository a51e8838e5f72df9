use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::users::Role,
    models::{Preferences, RecentlyViewedItem, WishlistItem},
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub preferences: Preferences,
    pub wishlist: Vec<WishlistItem>,
    pub recently_viewed: Vec<RecentlyViewedItem>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub product_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentlyViewedList {
    pub items: Vec<RecentlyViewedItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistView {
    pub items: Vec<WishlistItem>,
}
