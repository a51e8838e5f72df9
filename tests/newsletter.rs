mod common;

use urban_echo_api::{
    analytics::AnalyticsEvent,
    dto::newsletter::SubscribeRequest,
    error::AppError,
    services::newsletter_service::{normalize_email, subscribe},
};

use common::RecordingAnalytics;

#[test]
fn emails_are_trimmed_and_lowercased() {
    assert_eq!(
        normalize_email("  Jane.Doe@Example.COM ").unwrap(),
        "jane.doe@example.com"
    );
}

#[test]
fn malformed_emails_are_rejected() {
    let too_long = format!("{}@example.com", "a".repeat(250));
    for bad in [
        "",
        "jane",
        "jane@",
        "@example.com",
        "jane@example",
        "jane@@example.com",
        "jane doe@example.com",
        "jane@.example.com",
        "jane@example.com.",
        too_long.as_str(),
    ] {
        match normalize_email(bad) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "email", "{bad}"),
            other => panic!("expected rejection for {bad:?}, got {other:?}"),
        }
    }
}

#[test]
fn subscribe_confirms_and_tracks_domain() {
    let analytics = RecordingAnalytics::default();
    let response = subscribe(
        &analytics,
        SubscribeRequest {
            email: "Fan@UrbanEcho.shop".into(),
        },
    )
    .unwrap();

    let confirmation = response.data.expect("confirmation");
    assert_eq!(confirmation.email, "fan@urbanecho.shop");
    assert!(confirmation.subscribed);

    assert_eq!(
        analytics.events(),
        vec![AnalyticsEvent::NewsletterSignup {
            email_domain: "urbanecho.shop".into()
        }]
    );
}

#[test]
fn rejected_signup_tracks_nothing() {
    let analytics = RecordingAnalytics::default();
    let result = subscribe(
        &analytics,
        SubscribeRequest {
            email: "not-an-email".into(),
        },
    );

    assert!(result.is_err());
    assert!(analytics.events().is_empty());
}
