//! Query Parameter Resolution
//!
//! Turns raw `page`/`limit`/`sortBy`/`order` query strings into bounded
//! pagination and allow-listed sorting. Sort columns are `&'static str`
//! drawn from the allow-list, so untrusted text never reaches a query string.

use std::fmt;

use serde::Deserialize;

// == Defaults ==
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

// == Raw Query ==
/// Query string of a list request, exactly as the client sent it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

// == Pagination ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    /// Rows per page, always in `1..=max_limit`
    pub limit: i64,
    /// Rows to skip, never negative
    pub offset: i64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

// == Sorting ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive `desc` means descending, anything else ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortParams {
    /// Column name taken from the caller's allow-list
    pub sort_by: &'static str,
    pub order: SortOrder,
}

// == Resolvers ==
/// Parses the leading integer of `raw`, so `"2abc"` and `"2.5"` both read as 2.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digits_len = raw[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    raw[..sign_len + digits_len].parse().ok()
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(leading_integer).filter(|value| *value > 0)
}

/// Resolves `page` and `limit` into a limit/offset pair.
///
/// Each value is read up to its first non-digit. Missing, non-numeric and
/// non-positive values fall back to page 1 and `default_limit`; the limit is
/// then capped at `max_limit`.
pub fn resolve_pagination(
    page: Option<&str>,
    limit: Option<&str>,
    default_limit: i64,
    max_limit: i64,
) -> PaginationParams {
    let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
    let limit = parse_positive(limit)
        .unwrap_or(default_limit)
        .min(max_limit)
        .max(1);

    PaginationParams {
        limit,
        offset: (page - 1).saturating_mul(limit),
    }
}

/// Resolves `sortBy` and `order`.
///
/// A `sortBy` outside `allowed` (or absent) becomes `default_sort_by`.
pub fn resolve_sort(
    sort_by: Option<&str>,
    order: Option<&str>,
    allowed: &[&'static str],
    default_sort_by: &'static str,
) -> SortParams {
    let sort_by = sort_by
        .and_then(|requested| allowed.iter().copied().find(|column| *column == requested))
        .unwrap_or(default_sort_by);

    SortParams {
        sort_by,
        order: SortOrder::parse(order),
    }
}

impl ListQuery {
    pub fn pagination(&self, default_limit: i64, max_limit: i64) -> PaginationParams {
        resolve_pagination(
            self.page.as_deref(),
            self.limit.as_deref(),
            default_limit,
            max_limit,
        )
    }

    pub fn sort(&self, allowed: &[&'static str], default_sort_by: &'static str) -> SortParams {
        resolve_sort(
            self.sort_by.as_deref(),
            self.order.as_deref(),
            allowed,
            default_sort_by,
        )
    }
}
