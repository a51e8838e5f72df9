use serde_json::json;
use urban_echo_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    services::category_service::reconcile_product_counts,
};
use uuid::Uuid;

struct SeedProduct {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    price: i64,
    compare_at_price: Option<i64>,
    category: &'static str,
    subcategory: Option<&'static str>,
    colors: &'static [&'static str],
    sizes: &'static [&'static str],
    stock_per_variant: i32,
    featured: bool,
    new_arrival: bool,
    best_seller: bool,
    sales_count: i32,
    average_rating: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    seed_categories(&pool).await?;
    seed_products(&pool).await?;

    let updated = reconcile_product_counts(&pool).await?;
    println!("Seed completed. Category counts updated: {updated}");
    Ok(())
}

async fn seed_categories(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let categories = [
        ("Men", "men", None, 1),
        ("Women", "women", None, 2),
        ("Accessories", "accessories", None, 3),
        ("Men's Tops", "men-tops", Some("men"), 1),
        ("Women's Dresses", "women-dresses", Some("women"), 1),
        ("Bags", "bags", Some("accessories"), 1),
    ];

    for (name, slug, parent, sort_order) in categories {
        let (level, path) = match parent {
            Some(parent) => (1, format!("{parent}/{slug}")),
            None => (0, slug.to_string()),
        };
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug, parent_category, level, path, sort_order, seo_title)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(slug)
        .bind(parent)
        .bind(level)
        .bind(path)
        .bind(sort_order)
        .bind(format!("{name} | Urban Echo"))
        .execute(pool)
        .await?;
    }

    println!("Seeded categories");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = [
        SeedProduct {
            name: "Echo Oversized Tee",
            slug: "echo-oversized-tee",
            description: "Heavyweight cotton tee with a relaxed fit.",
            price: 3500,
            compare_at_price: None,
            category: "men",
            subcategory: Some("men-tops"),
            colors: &["Black", "White"],
            sizes: &["S", "M", "L"],
            stock_per_variant: 12,
            featured: true,
            new_arrival: false,
            best_seller: true,
            sales_count: 420,
            average_rating: 4.6,
        },
        SeedProduct {
            name: "Night Shift Hoodie",
            slug: "night-shift-hoodie",
            description: "Brushed fleece hoodie with tonal embroidery.",
            price: 7800,
            compare_at_price: Some(9500),
            category: "men",
            subcategory: Some("men-tops"),
            colors: &["Charcoal"],
            sizes: &["M", "L", "XL"],
            stock_per_variant: 5,
            featured: false,
            new_arrival: true,
            best_seller: true,
            sales_count: 310,
            average_rating: 4.8,
        },
        SeedProduct {
            name: "Skyline Slip Dress",
            slug: "skyline-slip-dress",
            description: "Bias-cut satin dress for late evenings.",
            price: 11000,
            compare_at_price: None,
            category: "women",
            subcategory: Some("women-dresses"),
            colors: &["Emerald", "Black"],
            sizes: &["XS", "S", "M"],
            stock_per_variant: 4,
            featured: true,
            new_arrival: true,
            best_seller: false,
            sales_count: 95,
            average_rating: 4.4,
        },
        SeedProduct {
            name: "Transit Tote",
            slug: "transit-tote",
            description: "Waxed canvas tote with a padded laptop sleeve.",
            price: 6400,
            compare_at_price: None,
            category: "accessories",
            subcategory: Some("bags"),
            colors: &["Olive"],
            sizes: &[],
            stock_per_variant: 20,
            featured: false,
            new_arrival: false,
            best_seller: true,
            sales_count: 540,
            average_rating: 4.7,
        },
        SeedProduct {
            name: "Signal Beanie",
            slug: "signal-beanie",
            description: "Ribbed merino beanie.",
            price: 2800,
            compare_at_price: Some(3200),
            category: "accessories",
            subcategory: None,
            colors: &["Rust", "Navy"],
            sizes: &[],
            stock_per_variant: 0,
            featured: false,
            new_arrival: true,
            best_seller: true,
            sales_count: 150,
            average_rating: 4.2,
        },
        SeedProduct {
            name: "Underpass Cap",
            slug: "underpass-cap",
            description: "Six-panel cap in washed twill.",
            price: 2400,
            compare_at_price: None,
            category: "accessories",
            subcategory: None,
            colors: &["Stone"],
            sizes: &[],
            stock_per_variant: 30,
            featured: true,
            new_arrival: false,
            best_seller: true,
            sales_count: 260,
            average_rating: 4.5,
        },
    ];

    for product in products {
        let variants = variants_for(&product);
        let images = json!([
            { "url": format!("/images/products/{}-1.jpg", product.slug), "alt": product.name, "position": 0 },
            { "url": format!("/images/products/{}-2.jpg", product.slug), "alt": product.name, "position": 1 },
        ]);
        let tags = json!([product.category, product.subcategory.unwrap_or(product.category)]);

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, slug, description, price, compare_at_price, category, subcategory,
                images, variants, tags, is_featured, is_new_arrival, is_best_seller, is_on_sale,
                free_shipping, average_rating, review_count, sales_count
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(product.name)
        .bind(product.slug)
        .bind(product.description)
        .bind(product.price)
        .bind(product.compare_at_price)
        .bind(product.category)
        .bind(product.subcategory)
        .bind(images)
        .bind(variants)
        .bind(tags)
        .bind(product.featured)
        .bind(product.new_arrival)
        .bind(product.best_seller)
        .bind(product.compare_at_price.is_some())
        .bind(product.price >= 5000)
        .bind(product.average_rating)
        .bind(product.sales_count / 10)
        .bind(product.sales_count)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

fn variants_for(product: &SeedProduct) -> serde_json::Value {
    let sizes: Vec<Option<&str>> = if product.sizes.is_empty() {
        vec![None]
    } else {
        product.sizes.iter().map(|s| Some(*s)).collect()
    };

    let mut variants = Vec::new();
    for color in product.colors {
        for size in &sizes {
            let sku = format!(
                "{}-{}-{}",
                product.slug,
                color.to_lowercase(),
                size.unwrap_or("os").to_lowercase()
            );
            variants.push(json!({
                "sku": sku.to_uppercase(),
                "color": color,
                "size": size,
                "inventory": product.stock_per_variant,
            }));
        }
    }
    serde_json::Value::Array(variants)
}
