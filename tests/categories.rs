use chrono::{TimeZone, Utc};
use urban_echo_api::{
    entity::categories::Model as CategoryModel,
    services::category_service::{CategoryStatus, TreeOptions, build_tree},
};
use uuid::Uuid;

fn category(slug: &str, parent: Option<&str>, product_count: i32) -> CategoryModel {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().fixed_offset();
    CategoryModel {
        id: Uuid::new_v4(),
        name: slug.to_uppercase(),
        slug: slug.to_string(),
        description: None,
        parent_category: parent.map(str::to_string),
        level: i32::from(parent.is_some()),
        path: match parent {
            Some(parent) => format!("{parent}/{slug}"),
            None => slug.to_string(),
        },
        sort_order: 0,
        is_active: true,
        show_in_navigation: true,
        image_url: None,
        seo_title: None,
        seo_description: None,
        product_count,
        created_at: now,
        updated_at: now,
    }
}

const NESTED: TreeOptions = TreeOptions {
    include_product_count: false,
    include_sub_categories: true,
};

#[test]
fn children_nest_under_parents_in_order() {
    let rows = vec![
        category("men", None, 4),
        category("women", None, 2),
        category("men-tops", Some("men"), 3),
        category("men-shoes", Some("men"), 1),
        category("dresses", Some("women"), 2),
    ];

    let tree = build_tree(rows, NESTED);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].slug, "men");

    let men_children: Vec<&str> = tree[0].sub_categories.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(men_children, vec!["men-tops", "men-shoes"]);
    assert_eq!(tree[1].sub_categories[0].slug, "dresses");
}

#[test]
fn orphans_become_roots() {
    let rows = vec![
        category("men", None, 0),
        category("sale-hats", Some("sale"), 0),
        category("loop", Some("loop"), 0),
    ];

    let tree = build_tree(rows, NESTED);
    let roots: Vec<&str> = tree.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(roots, vec!["men", "sale-hats", "loop"]);
}

#[test]
fn parent_cycles_are_rooted_not_dropped() {
    let rows = vec![
        category("men", None, 0),
        category("outer", Some("shell"), 0),
        category("shell", Some("outer"), 0),
        category("parkas", Some("outer"), 0),
    ];

    let tree = build_tree(rows, NESTED);
    let roots: Vec<&str> = tree.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(roots, vec!["men", "outer", "shell"]);
    assert_eq!(tree[1].sub_categories.len(), 1);
    assert_eq!(tree[1].sub_categories[0].slug, "parkas");
    assert!(tree[2].sub_categories.is_empty());
}

#[test]
fn product_counts_only_when_requested() {
    let rows = vec![category("accessories", None, 9)];

    let without = build_tree(rows.clone(), NESTED);
    assert_eq!(without[0].product_count, None);
    let json = serde_json::to_value(&without[0]).unwrap();
    assert!(json.get("productCount").is_none());

    let with = build_tree(
        rows,
        TreeOptions {
            include_product_count: true,
            ..NESTED
        },
    );
    assert_eq!(with[0].product_count, Some(9));
}

#[test]
fn flat_listing_drops_children() {
    let rows = vec![category("men", None, 0), category("men-tops", Some("men"), 0)];

    let tree = build_tree(
        rows,
        TreeOptions {
            include_sub_categories: false,
            ..NESTED
        },
    );
    assert_eq!(tree.len(), 1);
    assert!(tree[0].sub_categories.is_empty());
}

#[test]
fn status_parsing() {
    assert_eq!(CategoryStatus::parse(None).unwrap(), CategoryStatus::Active);
    assert_eq!(CategoryStatus::parse(Some("")).unwrap(), CategoryStatus::Active);
    assert_eq!(CategoryStatus::parse(Some("inactive")).unwrap(), CategoryStatus::Inactive);
    assert_eq!(CategoryStatus::parse(Some("all")).unwrap(), CategoryStatus::All);
    assert!(CategoryStatus::parse(Some("archived")).is_err());
}
