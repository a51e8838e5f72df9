use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    content::{AboutContent, AboutValue, ContentImage, HeroContent},
    dto::{
        categories::{CategoryNode, CategoryTree},
        client_errors::{ClientErrorReceipt, ClientErrorReport, ErrorSinkStatus},
        newsletter::{SubscribeRequest, SubscriptionConfirmation},
        products::{ProductDetail, ProductList, ProductSummary, SearchResults},
        users::{ProductRef, RecentlyViewedList, UserProfile, WishlistView},
    },
    entity::users::Role,
    error::{ErrorData, ErrorKind},
    models::{Preferences, ProductImage, ProductVariant, RecentlyViewedItem, WishlistItem},
    response::{ApiResponse, ContentSource, Meta},
    routes::{client_errors, content, health, newsletter, products, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::best_sellers,
        products::featured,
        products::new_arrivals,
        products::search_products,
        products::list_categories,
        products::get_product,
        content::hero,
        content::about,
        newsletter::subscribe,
        client_errors::report_client_error,
        client_errors::error_sink_status,
        users::me,
        users::record_recently_viewed,
        users::add_to_wishlist,
        users::remove_from_wishlist
    ),
    components(
        schemas(
            ProductSummary,
            ProductDetail,
            ProductImage,
            ProductVariant,
            ProductList,
            SearchResults,
            CategoryNode,
            CategoryTree,
            HeroContent,
            AboutContent,
            AboutValue,
            ContentImage,
            SubscribeRequest,
            SubscriptionConfirmation,
            ClientErrorReport,
            ClientErrorReceipt,
            ErrorSinkStatus,
            UserProfile,
            Role,
            Preferences,
            WishlistItem,
            RecentlyViewedItem,
            ProductRef,
            RecentlyViewedList,
            WishlistView,
            ErrorData,
            ErrorKind,
            ContentSource,
            Meta,
            ApiResponse<ProductList>,
            ApiResponse<ProductDetail>,
            ApiResponse<SearchResults>,
            ApiResponse<CategoryTree>,
            ApiResponse<HeroContent>,
            ApiResponse<AboutContent>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product listing, search and detail"),
        (name = "Categories", description = "Category navigation"),
        (name = "Content", description = "CMS-backed marketing content"),
        (name = "Newsletter", description = "Newsletter signup"),
        (name = "Errors", description = "Client error reporting"),
        (name = "Users", description = "Signed-in user lists (when auth is enabled)"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
