//! Marketing content with static fallbacks. Every field of a resolved
//! content object is populated, whatever the CMS returned.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Hero,
    About,
}

impl ContentKind {
    /// Single-type identifier on the CMS side.
    pub fn cms_type(&self) -> &'static str {
        match self {
            ContentKind::Hero => "hero",
            ContentKind::About => "about",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ContentImage {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub cta_text: String,
    pub cta_link: String,
    pub secondary_cta_text: String,
    pub secondary_cta_link: String,
    pub background_image: ContentImage,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AboutValue {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub title: String,
    pub subtitle: String,
    pub mission: String,
    pub story: String,
    pub values: Vec<AboutValue>,
    pub image: ContentImage,
    pub last_updated: DateTime<Utc>,
}

pub fn hero_fallback() -> HeroContent {
    HeroContent {
        title: "Sound of the Street".to_string(),
        subtitle: "New Season Collection".to_string(),
        description: "Discover pieces made for city life: bold cuts, honest fabrics and everyday comfort."
            .to_string(),
        cta_text: "Shop Now".to_string(),
        cta_link: "/shop".to_string(),
        secondary_cta_text: "New Arrivals".to_string(),
        secondary_cta_link: "/shop/new-arrivals".to_string(),
        background_image: ContentImage {
            url: "/images/hero/hero-fallback.jpg".to_string(),
            alt: "Urban Echo new season collection".to_string(),
        },
        last_updated: Utc::now(),
    }
}

pub fn about_fallback() -> AboutContent {
    AboutContent {
        title: "About Urban Echo".to_string(),
        subtitle: "Streetwear with a conscience".to_string(),
        mission: "We make clothing that reflects the energy of the city while respecting the people and places that make it."
            .to_string(),
        story: "Urban Echo started as a small studio sketching limited runs for friends. Today we design every collection in house and produce with partners we know by name."
            .to_string(),
        values: vec![
            AboutValue {
                title: "Quality".to_string(),
                description: "Fabrics and finishes chosen to last more than a season.".to_string(),
            },
            AboutValue {
                title: "Sustainability".to_string(),
                description: "Responsible materials and small production runs.".to_string(),
            },
            AboutValue {
                title: "Community".to_string(),
                description: "Collaborations with local artists and makers.".to_string(),
            },
        ],
        image: ContentImage {
            url: "/images/about/about-fallback.jpg".to_string(),
            alt: "The Urban Echo studio".to_string(),
        },
        last_updated: Utc::now(),
    }
}

/// Merge a CMS entry over the hero fallback. `media_base` prefixes relative media URLs.
pub fn resolve_hero(entry: Option<&Value>, media_base: &str) -> HeroContent {
    let fallback = hero_fallback();
    let Some(entry) = entry else {
        return fallback;
    };

    HeroContent {
        title: text(entry, "title").unwrap_or(fallback.title),
        subtitle: text(entry, "subtitle").unwrap_or(fallback.subtitle),
        description: text(entry, "description").unwrap_or(fallback.description),
        cta_text: text(entry, "ctaText").unwrap_or(fallback.cta_text),
        cta_link: text(entry, "ctaLink").unwrap_or(fallback.cta_link),
        secondary_cta_text: text(entry, "secondaryCtaText").unwrap_or(fallback.secondary_cta_text),
        secondary_cta_link: text(entry, "secondaryCtaLink").unwrap_or(fallback.secondary_cta_link),
        background_image: media(entry, "backgroundImage", media_base, fallback.background_image),
        last_updated: updated_at(entry).unwrap_or(fallback.last_updated),
    }
}

pub fn resolve_about(entry: Option<&Value>, media_base: &str) -> AboutContent {
    let fallback = about_fallback();
    let Some(entry) = entry else {
        return fallback;
    };

    let values: Vec<AboutValue> = entry
        .get("values")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    Some(AboutValue {
                        title: text(item, "title")?,
                        description: text(item, "description")?,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    AboutContent {
        title: text(entry, "title").unwrap_or(fallback.title),
        subtitle: text(entry, "subtitle").unwrap_or(fallback.subtitle),
        mission: text(entry, "mission").unwrap_or(fallback.mission),
        story: text(entry, "story").unwrap_or(fallback.story),
        values: if values.is_empty() {
            fallback.values
        } else {
            values
        },
        image: media(entry, "image", media_base, fallback.image),
        last_updated: updated_at(entry).unwrap_or(fallback.last_updated),
    }
}

fn text(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Media fields arrive as `{data: {attributes: {url, alternativeText}}}`,
/// `{data: {url, ..}}` or a bare `{url, ..}`.
fn media(entry: &Value, key: &str, media_base: &str, fallback: ContentImage) -> ContentImage {
    let Some(mut node) = entry.get(key) else {
        return fallback;
    };
    if let Some(data) = node.get("data") {
        node = match data {
            Value::Array(items) => match items.first() {
                Some(first) => first,
                None => return fallback,
            },
            other => other,
        };
    }
    if let Some(attributes) = node.get("attributes") {
        node = attributes;
    }

    let Some(url) = text(node, "url") else {
        return fallback;
    };
    let url = if url.starts_with('/') && !url.starts_with("//") {
        format!("{}{url}", media_base.trim_end_matches('/'))
    } else {
        url
    };

    ContentImage {
        url,
        alt: text(node, "alternativeText")
            .or_else(|| text(node, "alt"))
            .unwrap_or(fallback.alt),
    }
}

fn updated_at(entry: &Value) -> Option<DateTime<Utc>> {
    let raw = entry
        .get("updatedAt")
        .or_else(|| entry.get("publishedAt"))
        .and_then(Value::as_str)?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
