use chrono::Utc;

use crate::{
    analytics::{AnalyticsEvent, AnalyticsSink},
    dto::newsletter::{SubscribeRequest, SubscriptionConfirmation},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
};

const MAX_EMAIL_LENGTH: usize = 254;

/// Accepts the signup without persisting it; the confirmation is what the
/// storefront shows.
pub fn subscribe(
    analytics: &dyn AnalyticsSink,
    payload: SubscribeRequest,
) -> AppResult<ApiResponse<SubscriptionConfirmation>> {
    let email = normalize_email(&payload.email)?;
    let domain = email
        .rsplit_once('@')
        .map(|(_, domain)| domain.to_string())
        .unwrap_or_default();

    tracing::info!(email_domain = %domain, "newsletter subscription accepted");
    analytics.track(&AnalyticsEvent::NewsletterSignup {
        email_domain: domain,
    });

    Ok(ApiResponse::success(
        "Subscribed to newsletter",
        SubscriptionConfirmation {
            email,
            subscribed: true,
            subscribed_at: Utc::now(),
        },
        Some(Meta::empty()),
    ))
}

pub fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    if email.len() > MAX_EMAIL_LENGTH || !is_valid_email(&email) {
        return Err(AppError::validation(
            "email",
            "please enter a valid email address",
        ));
    }
    Ok(email)
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
