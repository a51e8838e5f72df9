//! Injectable analytics sink. Handlers report events through the trait object
//! held in app state; whether anything is recorded depends on configuration.

use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    ViewItem { product_id: String, category: String },
    Search { term: String, results: u64 },
    NewsletterSignup { email_domain: String },
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::ViewItem { .. } => "view_item",
            AnalyticsEvent::Search { .. } => "search",
            AnalyticsEvent::NewsletterSignup { .. } => "newsletter_signup",
        }
    }
}

pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &AnalyticsEvent);
}

pub type SharedAnalytics = Arc<dyn AnalyticsSink>;

/// Emits each event as a structured log line under the `analytics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        match event {
            AnalyticsEvent::ViewItem {
                product_id,
                category,
            } => tracing::info!(
                target: "analytics",
                event = event.name(),
                product_id = %product_id,
                category = %category
            ),
            AnalyticsEvent::Search { term, results } => tracing::info!(
                target: "analytics",
                event = event.name(),
                term = %term,
                results = results
            ),
            AnalyticsEvent::NewsletterSignup { email_domain } => tracing::info!(
                target: "analytics",
                event = event.name(),
                email_domain = %email_domain
            ),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track(&self, _event: &AnalyticsEvent) {}
}

pub fn from_flag(enabled: bool) -> SharedAnalytics {
    if enabled {
        Arc::new(TracingAnalytics)
    } else {
        Arc::new(NoopAnalytics)
    }
}
