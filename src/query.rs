//! Translation of validated query parameters into product filters, sort
//! orders and pagination windows. Nothing here touches the database.

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, Select,
    sea_query::{Expr, extension::postgres::PgExpr},
};

use crate::{
    entity::products::{Column, Entity as Products},
    error::{AppError, AppResult},
    routes::params::{ListingParams, NewArrivalsParams, SearchParams},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitRule {
    pub default: u64,
    pub max: u64,
}

pub const BEST_SELLERS_LIMIT: LimitRule = LimitRule { default: 8, max: 50 };
pub const FEATURED_LIMIT: LimitRule = LimitRule { default: 8, max: 50 };
pub const NEW_ARRIVALS_LIMIT: LimitRule = LimitRule { default: 12, max: 50 };
pub const SEARCH_LIMIT: LimitRule = LimitRule { default: 20, max: 100 };

pub const MAX_SEARCH_LENGTH: usize = 100;

const SEARCH_DOCUMENT: &str = "to_tsvector('english', name || ' ' || coalesce(description, ''))";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>, default: SortOrder) -> AppResult<Self> {
        match non_blank(raw).map(str::to_ascii_lowercase).as_deref() {
            None => Ok(default),
            Some("asc") => Ok(SortOrder::Asc),
            Some("desc") => Ok(SortOrder::Desc),
            Some(other) => Err(AppError::validation(
                "order",
                format!("expected 'asc' or 'desc', got '{other}'"),
            )),
        }
    }
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    SalesCount,
    AverageRating,
    CreatedAt,
    Price,
    Name,
    /// Full-text rank against the search term.
    Relevance,
}

impl SortField {
    fn column(&self) -> Option<Column> {
        match self {
            SortField::SalesCount => Some(Column::SalesCount),
            SortField::AverageRating => Some(Column::AverageRating),
            SortField::CreatedAt => Some(Column::CreatedAt),
            SortField::Price => Some(Column::Price),
            SortField::Name => Some(Column::Name),
            SortField::Relevance => None,
        }
    }
}

pub type SortSpec = Vec<(SortField, SortOrder)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
    pub skip: u64,
}

impl PageWindow {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page,
            limit,
            skip: page.saturating_sub(1).saturating_mul(limit),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub best_seller: bool,
    pub featured: bool,
    pub new_arrival: bool,
    pub on_sale: bool,
    pub free_shipping: bool,
    pub category: Option<String>,
    /// Inclusive bounds in cents.
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub text: Option<String>,
}

impl ProductFilter {
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all().add(Column::IsActive.eq(true));

        if self.best_seller {
            condition = condition.add(Column::IsBestSeller.eq(true));
        }
        if self.featured {
            condition = condition.add(Column::IsFeatured.eq(true));
        }
        if self.new_arrival {
            condition = condition.add(Column::IsNewArrival.eq(true));
        }
        if self.on_sale {
            condition = condition.add(Column::IsOnSale.eq(true));
        }
        if self.free_shipping {
            condition = condition.add(Column::FreeShipping.eq(true));
        }
        if let Some(category) = &self.category {
            condition = condition.add(Column::Category.eq(category.clone()));
        }
        if let Some(min_price) = self.min_price {
            condition = condition.add(Column::Price.gte(min_price));
        }
        if let Some(max_price) = self.max_price {
            condition = condition.add(Column::Price.lte(max_price));
        }
        if let Some(text) = &self.text {
            let pattern = format!("%{}%", escape_like(text));
            condition = condition.add(
                Condition::any()
                    .add(Expr::col(Column::Name).ilike(pattern.clone()))
                    .add(Expr::col(Column::Description).ilike(pattern.clone()))
                    .add(Expr::cust_with_values(
                        "EXISTS (SELECT 1 FROM jsonb_array_elements_text(tags) AS tag WHERE tag ILIKE $1)",
                        [pattern],
                    )),
            );
        }

        condition
    }
}

/// A fully validated product listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub sort: SortSpec,
    pub window: PageWindow,
}

impl ProductQuery {
    pub fn best_sellers(params: &ListingParams) -> AppResult<Self> {
        let limit = parse_limit(params.limit.as_deref(), BEST_SELLERS_LIMIT)?;
        Ok(Self {
            filter: ProductFilter {
                best_seller: true,
                category: parse_category(params.category.as_deref()),
                ..ProductFilter::default()
            },
            sort: vec![
                (SortField::SalesCount, SortOrder::Desc),
                (SortField::AverageRating, SortOrder::Desc),
            ],
            window: PageWindow::new(1, limit),
        })
    }

    pub fn featured(params: &ListingParams) -> AppResult<Self> {
        let limit = parse_limit(params.limit.as_deref(), FEATURED_LIMIT)?;
        Ok(Self {
            filter: ProductFilter {
                featured: true,
                category: parse_category(params.category.as_deref()),
                ..ProductFilter::default()
            },
            sort: vec![
                (SortField::AverageRating, SortOrder::Desc),
                (SortField::CreatedAt, SortOrder::Desc),
            ],
            window: PageWindow::new(1, limit),
        })
    }

    pub fn new_arrivals(params: &NewArrivalsParams) -> AppResult<Self> {
        let limit = parse_limit(params.limit.as_deref(), NEW_ARRIVALS_LIMIT)?;
        let page = parse_page(params.page.as_deref())?;
        let field = match non_blank(params.sort.as_deref()) {
            None | Some("createdAt") | Some("newest") => SortField::CreatedAt,
            Some("price") => SortField::Price,
            Some("name") => SortField::Name,
            Some("rating") => SortField::AverageRating,
            Some("popularity") => SortField::SalesCount,
            Some(other) => {
                return Err(AppError::validation(
                    "sort",
                    format!(
                        "expected one of createdAt, price, name, rating, popularity; got '{other}'"
                    ),
                ));
            }
        };
        let order = SortOrder::parse(params.order.as_deref(), SortOrder::Desc)?;

        let mut sort = vec![(field, order)];
        if field != SortField::CreatedAt {
            sort.push((SortField::CreatedAt, SortOrder::Desc));
        }

        Ok(Self {
            filter: ProductFilter {
                new_arrival: true,
                category: parse_category(params.category.as_deref()),
                ..ProductFilter::default()
            },
            sort,
            window: PageWindow::new(page, limit),
        })
    }

    pub fn search(params: &SearchParams) -> AppResult<Self> {
        let text = non_blank(params.q.as_deref())
            .or_else(|| non_blank(params.search.as_deref()))
            .ok_or_else(|| AppError::validation("q", "a search term is required"))?;
        if text.chars().count() > MAX_SEARCH_LENGTH {
            return Err(AppError::validation(
                "q",
                format!("must be at most {MAX_SEARCH_LENGTH} characters"),
            ));
        }

        let limit = parse_limit(params.limit.as_deref(), SEARCH_LIMIT)?;
        let page = parse_page(params.page.as_deref())?;
        let min_price = parse_price("minPrice", params.min_price.as_deref())?;
        let max_price = parse_price("maxPrice", params.max_price.as_deref())?;
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(AppError::validation(
                    "minPrice",
                    "must not be greater than maxPrice",
                ));
            }
        }

        let sort = match non_blank(params.sort_by.as_deref()) {
            None | Some("relevance") => vec![
                (SortField::Relevance, SortOrder::Desc),
                (SortField::SalesCount, SortOrder::Desc),
            ],
            Some("price-asc") => vec![(SortField::Price, SortOrder::Asc)],
            Some("price-desc") => vec![(SortField::Price, SortOrder::Desc)],
            Some("newest") => vec![(SortField::CreatedAt, SortOrder::Desc)],
            Some("rating") => vec![
                (SortField::AverageRating, SortOrder::Desc),
                (SortField::SalesCount, SortOrder::Desc),
            ],
            Some("popular") => vec![(SortField::SalesCount, SortOrder::Desc)],
            Some(other) => {
                return Err(AppError::validation(
                    "sortBy",
                    format!(
                        "expected one of relevance, price-asc, price-desc, newest, rating, popular; got '{other}'"
                    ),
                ));
            }
        };

        Ok(Self {
            filter: ProductFilter {
                category: parse_category(params.category.as_deref()),
                min_price,
                max_price,
                on_sale: parse_bool("onSale", params.on_sale.as_deref())?.unwrap_or(false),
                new_arrival: parse_bool("isNew", params.is_new.as_deref())?.unwrap_or(false),
                free_shipping: parse_bool("freeShipping", params.free_shipping.as_deref())?
                    .unwrap_or(false),
                text: Some(text.to_string()),
                ..ProductFilter::default()
            },
            sort,
            window: PageWindow::new(page, limit),
        })
    }

    /// Filtered and ordered select; the caller applies the window.
    pub fn select(&self) -> Select<Products> {
        let mut select = Products::find().filter(self.filter.condition());
        for (field, order) in &self.sort {
            select = match (field.column(), &self.filter.text) {
                (Some(column), _) => select.order_by(column, (*order).into()),
                (None, Some(text)) => select.order_by(
                    Expr::cust_with_values(
                        format!("ts_rank({SEARCH_DOCUMENT}, plainto_tsquery('english', $1))"),
                        [text.clone()],
                    ),
                    (*order).into(),
                ),
                (None, None) => select,
            };
        }
        // Stable paging across equal sort keys.
        select.order_by_asc(Column::Id)
    }
}

pub fn parse_limit(raw: Option<&str>, rule: LimitRule) -> AppResult<u64> {
    let Some(raw) = non_blank(raw) else {
        return Ok(rule.default);
    };
    let limit = raw.parse::<u64>().map_err(|_| {
        AppError::validation("limit", format!("must be a positive integer, got '{raw}'"))
    })?;
    if limit == 0 || limit > rule.max {
        return Err(AppError::validation(
            "limit",
            format!("must be between 1 and {}", rule.max),
        ));
    }
    Ok(limit)
}

pub fn parse_page(raw: Option<&str>) -> AppResult<u64> {
    let Some(raw) = non_blank(raw) else {
        return Ok(1);
    };
    match raw.parse::<u64>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(AppError::validation(
            "page",
            format!("must be a positive integer, got '{raw}'"),
        )),
    }
}

pub fn parse_bool(field: &'static str, raw: Option<&str>) -> AppResult<Option<bool>> {
    match non_blank(raw).map(str::to_ascii_lowercase).as_deref() {
        None => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(other) => Err(AppError::validation(
            field,
            format!("expected true or false, got '{other}'"),
        )),
    }
}

/// Parses a decimal amount into cents.
pub fn parse_price(field: &'static str, raw: Option<&str>) -> AppResult<Option<i64>> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    let amount = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| {
            AppError::validation(field, format!("must be a non-negative number, got '{raw}'"))
        })?;
    Ok(Some((amount * 100.0).round() as i64))
}

/// Empty and `all` mean no category restriction.
pub fn parse_category(raw: Option<&str>) -> Option<String> {
    non_blank(raw)
        .filter(|c| !c.eq_ignore_ascii_case("all"))
        .map(str::to_string)
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
