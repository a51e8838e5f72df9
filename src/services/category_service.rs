use std::collections::{HashMap, HashSet};

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    db::{DbPool, OrmConn},
    dto::categories::{CategoryNode, CategoryTree},
    entity::categories::{Column, Entity as Categories, Model as CategoryModel},
    error::{AppError, AppResult},
    query::parse_bool,
    response::{ApiResponse, Meta},
    routes::params::CategoryParams,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStatus {
    Active,
    Inactive,
    All,
}

impl CategoryStatus {
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None | Some("active") => Ok(CategoryStatus::Active),
            Some("inactive") => Ok(CategoryStatus::Inactive),
            Some("all") => Ok(CategoryStatus::All),
            Some(other) => Err(AppError::validation(
                "status",
                format!("expected active, inactive or all; got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    pub include_product_count: bool,
    pub include_sub_categories: bool,
}

pub async fn category_tree(
    db: &OrmConn,
    params: CategoryParams,
) -> AppResult<ApiResponse<CategoryTree>> {
    let status = CategoryStatus::parse(params.status.as_deref())?;
    let options = TreeOptions {
        include_product_count: parse_bool(
            "includeProductCount",
            params.include_product_count.as_deref(),
        )?
        .unwrap_or(false),
        include_sub_categories: parse_bool(
            "includeSubCategories",
            params.include_sub_categories.as_deref(),
        )?
        .unwrap_or(true),
    };

    let mut finder = Categories::find();
    finder = match status {
        CategoryStatus::Active => finder.filter(Column::IsActive.eq(true)),
        CategoryStatus::Inactive => finder.filter(Column::IsActive.eq(false)),
        CategoryStatus::All => finder,
    };
    let rows = finder
        .order_by_asc(Column::Level)
        .order_by_asc(Column::SortOrder)
        .order_by_asc(Column::Name)
        .all(db)
        .await?;

    let categories = build_tree(rows, options);
    let total = categories.len() as u64;
    Ok(ApiResponse::success(
        "Categories",
        CategoryTree { categories, total },
        Some(Meta::empty()),
    ))
}

/// Nest rows under their parents. Rows keep their input order among
/// siblings; a row whose parent is absent becomes a root.
pub fn build_tree(rows: Vec<CategoryModel>, options: TreeOptions) -> Vec<CategoryNode> {
    let slugs: HashSet<String> = rows.iter().map(|row| row.slug.clone()).collect();
    let cyclic = cyclic_slugs(&rows);

    let mut roots = Vec::new();
    let mut children: HashMap<String, Vec<CategoryModel>> = HashMap::new();
    for row in rows {
        match row.parent_category.as_deref() {
            Some(parent) if slugs.contains(parent) && !cyclic.contains(&row.slug) => {
                children.entry(parent.to_string()).or_default().push(row);
            }
            _ => roots.push(row),
        }
    }

    roots
        .into_iter()
        .map(|row| to_node(row, &mut children, options))
        .collect()
}

/// Slugs whose parent chain leads back to themselves. They are rooted so a
/// cycle cannot hide its members from the tree.
fn cyclic_slugs(rows: &[CategoryModel]) -> HashSet<String> {
    let parents: HashMap<&str, &str> = rows
        .iter()
        .filter_map(|row| Some((row.slug.as_str(), row.parent_category.as_deref()?)))
        .collect();

    rows.iter()
        .filter(|row| {
            let mut seen = HashSet::new();
            let mut current = parents.get(row.slug.as_str()).copied();
            while let Some(parent) = current {
                if parent == row.slug {
                    return true;
                }
                if !seen.insert(parent) {
                    return false;
                }
                current = parents.get(parent).copied();
            }
            false
        })
        .map(|row| row.slug.clone())
        .collect()
}

fn to_node(
    row: CategoryModel,
    children: &mut HashMap<String, Vec<CategoryModel>>,
    options: TreeOptions,
) -> CategoryNode {
    let sub_categories = if options.include_sub_categories {
        children
            .remove(&row.slug)
            .unwrap_or_default()
            .into_iter()
            .map(|child| to_node(child, children, options))
            .collect()
    } else {
        Vec::new()
    };

    CategoryNode {
        id: row.id.to_string(),
        name: row.name,
        slug: row.slug,
        description: row.description,
        parent_category: row.parent_category,
        level: row.level,
        path: row.path,
        sort_order: row.sort_order,
        is_active: row.is_active,
        show_in_navigation: row.show_in_navigation,
        image_url: row.image_url,
        seo_title: row.seo_title,
        seo_description: row.seo_description,
        product_count: options.include_product_count.then_some(row.product_count),
        sub_categories,
    }
}

/// Recompute every category's denormalized product count from the products
/// table. Returns the number of categories whose count changed.
pub async fn reconcile_product_counts(pool: &DbPool) -> AppResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE categories c
        SET product_count = counts.total, updated_at = NOW()
        FROM (
            SELECT c2.id, COUNT(p.id)::INT AS total
            FROM categories c2
            LEFT JOIN products p
                ON p.is_active
                AND (p.category = c2.slug OR p.subcategory = c2.slug)
            GROUP BY c2.id
        ) AS counts
        WHERE c.id = counts.id AND c.product_count <> counts.total
        "#,
    )
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
