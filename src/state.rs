use std::sync::Arc;

use crate::{analytics::SharedAnalytics, cms::CmsClient, config::AppConfig, db::OrmConn};

/// The ORM connection sits behind an `Arc`: `DatabaseConnection` is not
/// `Clone` when SeaORM's `mock` feature is enabled.
#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<OrmConn>,
    pub cms: CmsClient,
    pub analytics: SharedAnalytics,
    pub config: Arc<AppConfig>,
}
