//! Embedded documents stored in `jsonb` columns.

use chrono::{DateTime, Utc};
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum entries kept in a user's recently viewed list.
pub const RECENTLY_VIEWED_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub sku: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub inventory: i32,
    /// Overrides the product price when set.
    #[serde(default)]
    pub price: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Images(pub Vec<ProductImage>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Variants(pub Vec<ProductVariant>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Tags(pub Vec<String>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: Uuid,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentlyViewedItem {
    pub product_id: Uuid,
    pub viewed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub label: Option<String>,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromJsonQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub newsletter: bool,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub size: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            newsletter: false,
            currency: default_currency(),
            size: None,
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Wishlist(pub Vec<WishlistItem>);

impl Wishlist {
    pub fn contains(&self, product_id: Uuid) -> bool {
        self.0.iter().any(|item| item.product_id == product_id)
    }

    /// Returns `false` when the product was already listed.
    pub fn add(&mut self, product_id: Uuid, added_at: DateTime<Utc>) -> bool {
        if self.contains(product_id) {
            return false;
        }
        self.0.push(WishlistItem {
            product_id,
            added_at,
        });
        true
    }

    pub fn remove(&mut self, product_id: Uuid) -> bool {
        let before = self.0.len();
        self.0.retain(|item| item.product_id != product_id);
        self.0.len() != before
    }
}

/// Most recent first, one entry per product, at most [`RECENTLY_VIEWED_LIMIT`] entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct RecentlyViewed(pub Vec<RecentlyViewedItem>);

impl RecentlyViewed {
    pub fn record(&mut self, product_id: Uuid, viewed_at: DateTime<Utc>) {
        self.0.retain(|item| item.product_id != product_id);
        self.0.insert(
            0,
            RecentlyViewedItem {
                product_id,
                viewed_at,
            },
        );
        self.0.truncate(RECENTLY_VIEWED_LIMIT);
    }

    pub fn product_ids(&self) -> Vec<Uuid> {
        self.0.iter().map(|item| item.product_id).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Addresses(pub Vec<Address>);
