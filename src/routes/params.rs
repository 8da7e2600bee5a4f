use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Deepest page a client may request; keeps the offset well inside `i64`.
pub const MAX_PAGE: i64 = 100_000;

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).clamp(1, MAX_PAGE);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShopSortBy {
    CreatedAt,
    HourlyRate,
    ShopName,
}

// Query structs carry `page`/`per_page` inline: `serde(flatten)` does not
// parse numbers out of urlencoded strings.

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShopQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Category name; `All` disables the filter.
    pub category: Option<String>,
    /// Case-insensitive match on shop name, description or tag.
    pub q: Option<String>,
    pub available: Option<bool>,
    #[param(value_type = Option<String>)]
    pub sort_by: Option<ShopSortBy>,
    #[param(value_type = Option<String>)]
    pub sort_order: Option<SortOrder>,
}

impl ShopQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Category name; `All` disables the filter.
    pub category: Option<String>,
    pub shop_id: Option<Uuid>,
    pub q: Option<String>,
}

impl CatalogQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
}

impl StatusQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_applies_defaults_and_bounds() {
        assert_eq!(Pagination::default().normalize(), (1, 20, 0));
        assert_eq!(Pagination::new(3, 10).normalize(), (3, 10, 20));
        assert_eq!(Pagination::new(0, 500).normalize(), (1, 100, 0));
        assert_eq!(Pagination::new(-2, 0).normalize(), (1, 1, 0));
    }

    #[test]
    fn normalize_caps_huge_pages() {
        let (page, per_page, offset) = Pagination::new(i64::MAX, 100).normalize();
        assert_eq!(page, MAX_PAGE);
        assert_eq!(per_page, 100);
        assert_eq!(offset, (MAX_PAGE - 1) * 100);
    }
}
