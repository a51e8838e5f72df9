mod common;

use serde_json::json;
use urban_echo_api::{
    cms::unwrap_entry,
    content::{about_fallback, hero_fallback, resolve_about, resolve_hero},
    response::ContentSource,
    services::content_service,
};

use common::dead_cms;

const MEDIA_BASE: &str = "https://cms.example.com";

#[test]
fn missing_entry_yields_complete_fallback() {
    let hero = resolve_hero(None, MEDIA_BASE);
    let fallback = hero_fallback();
    assert_eq!(hero.title, fallback.title);
    assert_eq!(hero.cta_link, fallback.cta_link);
    assert_eq!(hero.background_image, fallback.background_image);

    let about = resolve_about(None, MEDIA_BASE);
    assert_eq!(about.values.len(), 3);
    assert!(!about.mission.is_empty());
}

#[test]
fn partial_entry_merges_per_field() {
    let entry = json!({
        "title": "Winter Drop",
        "subtitle": "   ",
        "ctaLink": "/shop/winter",
        "updatedAt": "2024-11-02T09:30:00.000Z"
    });

    let hero = resolve_hero(Some(&entry), MEDIA_BASE);
    let fallback = hero_fallback();

    assert_eq!(hero.title, "Winter Drop");
    assert_eq!(hero.cta_link, "/shop/winter");
    assert_eq!(hero.subtitle, fallback.subtitle);
    assert_eq!(hero.cta_text, fallback.cta_text);
    assert_eq!(hero.background_image, fallback.background_image);
    assert_eq!(hero.last_updated.to_rfc3339(), "2024-11-02T09:30:00+00:00");
}

#[test]
fn strapi_media_is_flattened_and_prefixed() {
    let entry = json!({
        "backgroundImage": {
            "data": {
                "id": 4,
                "attributes": {
                    "url": "/uploads/hero_winter.jpg",
                    "alternativeText": "Model in a parka"
                }
            }
        }
    });

    let hero = resolve_hero(Some(&entry), "https://cms.example.com/");
    assert_eq!(
        hero.background_image.url,
        "https://cms.example.com/uploads/hero_winter.jpg"
    );
    assert_eq!(hero.background_image.alt, "Model in a parka");

    let absolute = json!({
        "image": { "url": "https://cdn.example.com/about.jpg" }
    });
    let about = resolve_about(Some(&absolute), MEDIA_BASE);
    assert_eq!(about.image.url, "https://cdn.example.com/about.jpg");
    assert_eq!(about.image.alt, about_fallback().image.alt);
}

#[test]
fn about_values_fall_back_when_unusable() {
    let entry = json!({
        "values": [{ "title": "Only a title" }, { "description": "Only a description" }]
    });
    let about = resolve_about(Some(&entry), MEDIA_BASE);
    assert_eq!(about.values, about_fallback().values);

    let entry = json!({
        "values": [{ "title": "Craft", "description": "Cut and sewn in small batches." }]
    });
    let about = resolve_about(Some(&entry), MEDIA_BASE);
    assert_eq!(about.values.len(), 1);
    assert_eq!(about.values[0].title, "Craft");
}

#[test]
fn unwrap_entry_handles_response_shapes() {
    let v4 = json!({ "data": { "id": 1, "attributes": { "title": "v4" } } });
    assert_eq!(unwrap_entry(v4).unwrap()["title"], "v4");

    let flat = json!({ "data": { "id": 1, "title": "flat" } });
    assert_eq!(unwrap_entry(flat).unwrap()["title"], "flat");

    let list = json!({ "data": [{ "title": "first" }, { "title": "second" }] });
    assert_eq!(unwrap_entry(list).unwrap()["title"], "first");

    assert!(unwrap_entry(json!({ "data": null })).is_none());
    assert!(unwrap_entry(json!({ "data": [] })).is_none());
    assert!(unwrap_entry(json!({ "error": { "status": 404 } })).is_none());
}

#[tokio::test]
async fn unreachable_cms_serves_fallback_with_source() {
    let response = content_service::hero(&dead_cms()).await;

    let meta = response.meta.expect("meta");
    assert_eq!(meta.source, Some(ContentSource::Fallback));

    let hero = response.data.expect("hero");
    assert_eq!(hero.title, hero_fallback().title);

    let about = content_service::about(&dead_cms()).await;
    assert_eq!(about.meta.and_then(|m| m.source), Some(ContentSource::Fallback));
    assert!(about.data.is_some_and(|a| !a.story.is_empty()));
}
