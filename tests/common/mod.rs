#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use urban_echo_api::{
    analytics::{AnalyticsEvent, AnalyticsSink, NoopAnalytics},
    cms::CmsClient,
    config::{AppConfig, CmsConfig},
    db::OrmConn,
    entity::products::Model as ProductModel,
    models::{Images, ProductImage, ProductVariant, Tags, Variants},
    state::AppState,
};
use uuid::Uuid;

/// Nothing listens here, so every CMS request fails fast.
pub const DEAD_CMS_URL: &str = "http://127.0.0.1:9";

pub fn product(slug: &str, category: &str, sales_count: i32) -> ProductModel {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap().fixed_offset();
    ProductModel {
        id: Uuid::new_v4(),
        name: slug.replace('-', " "),
        slug: slug.to_string(),
        description: Some(format!("{slug} description")),
        price: 4500,
        compare_at_price: None,
        category: category.to_string(),
        subcategory: None,
        images: Images(vec![ProductImage {
            url: format!("/images/{slug}.jpg"),
            alt: Some(slug.to_string()),
            position: 0,
        }]),
        variants: Variants(vec![]),
        tags: Tags(vec![category.to_string()]),
        is_active: true,
        is_featured: false,
        is_new_arrival: false,
        is_best_seller: true,
        is_on_sale: false,
        free_shipping: false,
        average_rating: 4.5,
        review_count: 10,
        sales_count,
        created_at: created,
        updated_at: created,
    }
}

pub fn variant(sku: &str, size: Option<&str>, color: Option<&str>, inventory: i32) -> ProductVariant {
    ProductVariant {
        sku: sku.to_string(),
        size: size.map(str::to_string),
        color: color.map(str::to_string),
        inventory,
        price: None,
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://localhost/urban_echo_test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        site_url: "http://localhost:3000".to_string(),
        cms: CmsConfig {
            base_url: DEAD_CMS_URL.to_string(),
            token: None,
            timeout_secs: 1,
        },
        enable_analytics: false,
        enable_auth: false,
        jwt_secret: None,
        category_reconcile_secs: 0,
    }
}

pub fn dead_cms() -> CmsClient {
    CmsClient::new(&test_config().cms).expect("cms client")
}

pub fn test_state(orm: OrmConn) -> AppState {
    let config = test_config();
    AppState {
        orm: Arc::new(orm),
        cms: CmsClient::new(&config.cms).expect("cms client"),
        analytics: Arc::new(NoopAnalytics),
        config: Arc::new(config),
    }
}

/// Keeps every event it receives.
#[derive(Default)]
pub struct RecordingAnalytics {
    pub events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().expect("analytics lock").clone()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        self.events.lock().expect("analytics lock").push(event.clone());
    }
}
