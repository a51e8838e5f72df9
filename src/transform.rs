//! Projection of product rows into client shapes. Inputs are borrowed and
//! never modified.

use chrono::Utc;

use crate::{
    dto::products::{ProductDetail, ProductSummary},
    entity::products::Model as ProductModel,
    models::ProductVariant,
};

pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder-product.jpg";

pub fn product_summary(model: &ProductModel) -> ProductSummary {
    let variants = &model.variants.0;
    let total_inventory = total_inventory(variants);

    let mut images = model.images.0.clone();
    images.sort_by_key(|image| image.position);
    for image in &mut images {
        image.url = normalize_image_url(&image.url);
    }
    let image = images
        .first()
        .map(|image| image.url.clone())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    ProductSummary {
        id: model.id.to_string(),
        name: model.name.clone(),
        slug: model.slug.clone(),
        description: model.description.clone(),
        price: model.price,
        compare_at_price: model.compare_at_price,
        discount_percentage: discount_percentage(model.price, model.compare_at_price),
        category: model.category.clone(),
        subcategory: model.subcategory.clone(),
        image,
        images,
        colors: distinct(variants.iter().filter_map(|v| v.color.as_deref())),
        sizes: distinct(variants.iter().filter_map(|v| v.size.as_deref())),
        in_stock: total_inventory > 0,
        total_inventory,
        is_featured: model.is_featured,
        is_new_arrival: model.is_new_arrival,
        is_best_seller: model.is_best_seller,
        is_on_sale: model.is_on_sale,
        free_shipping: model.free_shipping,
        average_rating: model.average_rating,
        review_count: model.review_count,
        sales_count: model.sales_count,
    }
}

pub fn product_detail(model: &ProductModel) -> ProductDetail {
    ProductDetail {
        summary: product_summary(model),
        variants: model.variants.0.clone(),
        tags: model.tags.0.clone(),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

/// Negative inventory counts as zero.
pub fn total_inventory(variants: &[ProductVariant]) -> i64 {
    variants
        .iter()
        .map(|variant| i64::from(variant.inventory.max(0)))
        .sum()
}

pub fn normalize_image_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        PLACEHOLDER_IMAGE.to_string()
    } else if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

fn discount_percentage(price: i64, compare_at: Option<i64>) -> Option<u32> {
    let compare_at = compare_at.filter(|c| *c > price && *c > 0)?;
    let pct = ((compare_at - price) * 100 + compare_at / 2) / compare_at;
    u32::try_from(pct).ok()
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values.map(str::trim).filter(|v| !v.is_empty()) {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}
