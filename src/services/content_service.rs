use crate::{
    cms::CmsClient,
    content::{AboutContent, ContentKind, HeroContent, resolve_about, resolve_hero},
    error::ErrorKind,
    response::{ApiResponse, ContentSource, Meta},
};

/// CMS failures never reach the client: they resolve to the fallback content.
pub async fn hero(cms: &CmsClient) -> ApiResponse<HeroContent> {
    let (entry, source) = fetch(cms, ContentKind::Hero).await;
    let content = resolve_hero(entry.as_ref(), cms.base_url());
    ApiResponse::success("Hero content", content, Some(Meta::with_source(source)))
}

pub async fn about(cms: &CmsClient) -> ApiResponse<AboutContent> {
    let (entry, source) = fetch(cms, ContentKind::About).await;
    let content = resolve_about(entry.as_ref(), cms.base_url());
    ApiResponse::success("About content", content, Some(Meta::with_source(source)))
}

async fn fetch(cms: &CmsClient, kind: ContentKind) -> (Option<serde_json::Value>, ContentSource) {
    match cms.fetch_single(kind.cms_type()).await {
        Ok(entry) => (Some(entry), ContentSource::Cms),
        Err(err) => {
            tracing::warn!(
                kind = ErrorKind::CmsError.as_str(),
                content_type = kind.cms_type(),
                error = %err,
                "cms unavailable, serving fallback content"
            );
            (None, ContentSource::Fallback)
        }
    }
}
