use std::time::Duration;

use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::{db::DbPool, error::ErrorKind, services::category_service};

/// Spawn the periodic category count reconciliation. Returns `None` when the
/// interval is zero.
pub fn spawn_category_reconciler(pool: DbPool, every_secs: u64) -> Option<JoinHandle<()>> {
    if every_secs == 0 {
        tracing::info!("category reconciliation disabled");
        return None;
    }

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(every_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match category_service::reconcile_product_counts(&pool).await {
                Ok(0) => tracing::debug!("category counts already consistent"),
                Ok(updated) => tracing::info!(updated, "category product counts reconciled"),
                Err(err) => tracing::error!(
                    kind = ErrorKind::DatabaseError.as_str(),
                    error = ?err,
                    "category reconciliation failed"
                ),
            }
        }
    });
    Some(handle)
}
