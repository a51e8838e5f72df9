pub mod category_service;
pub mod content_service;
pub mod newsletter_service;
pub mod product_service;
pub mod reconcile;
pub mod user_service;
