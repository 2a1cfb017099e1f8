//! Query
//!
//! Query state for the products listing page: search, category, page and
//! sorting, round-tripped through URL-style key/value pairs, plus the
//! pagination arithmetic for the page widget.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductsRequest;

/// Category value meaning "no category filter".
pub const DEFAULT_CATEGORY: &str = "all";

/// Sort direction for product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending (the default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// The wire value for this direction.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Parsed query state for the products page.
///
/// Parsing is lenient: anything unparseable falls back to its default, so a
/// mangled URL still renders the unfiltered first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductsQuery {
    /// Free-text search term; empty means no search.
    pub search: String,
    /// Category slug; [`DEFAULT_CATEGORY`] means all categories.
    pub category: String,
    /// 1-based page number.
    pub page: u32,
    /// Field to sort by; empty means catalog order.
    pub sort_by: String,
    pub order: SortOrder,
}

impl Default for ProductsQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: DEFAULT_CATEGORY.to_owned(),
            page: 1,
            sort_by: String::new(),
            order: SortOrder::Asc,
        }
    }
}

impl ProductsQuery {
    /// Parse query state from URL-style key/value pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut query = Self::default();

        for (key, value) in pairs {
            match key {
                "search" => query.search = value.to_owned(),
                "category" => query.category = value.to_owned(),
                "page" => {
                    query.page = value.parse().ok().filter(|page| *page >= 1).unwrap_or(1);
                }
                "sortBy" => query.sort_by = value.to_owned(),
                "order" => {
                    query.order = if value == "desc" {
                        SortOrder::Desc
                    } else {
                        SortOrder::Asc
                    };
                }
                _ => {}
            }
        }

        query
    }

    /// Encode back to key/value pairs, omitting fields at their defaults.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }

        if self.category != DEFAULT_CATEGORY {
            pairs.push(("category", self.category.clone()));
        }

        if self.page != 1 {
            pairs.push(("page", self.page.to_string()));
        }

        if !self.sort_by.is_empty() {
            pairs.push(("sortBy", self.sort_by.clone()));
        }

        if self.order != SortOrder::Asc {
            pairs.push(("order", self.order.as_str().to_owned()));
        }

        pairs
    }

    /// Record offset for this page at the given page size.
    #[must_use]
    pub fn skip(&self, limit: u32) -> u32 {
        self.page.saturating_sub(1).saturating_mul(limit)
    }

    /// How many non-default filters are active (search, category, sort).
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        usize::from(!self.search.is_empty())
            + usize::from(self.category != DEFAULT_CATEGORY)
            + usize::from(!self.sort_by.is_empty())
    }

    /// Translate this page state into a catalog listing request.
    #[must_use]
    pub fn to_request(&self, limit: u32) -> ProductsRequest {
        ProductsRequest {
            limit,
            skip: self.skip(limit),
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            category: (self.category != DEFAULT_CATEGORY).then(|| self.category.clone()),
            sort_by: (!self.sort_by.is_empty()).then(|| self.sort_by.clone()),
            order: (!self.sort_by.is_empty()).then_some(self.order),
        }
    }
}

/// Number of pages needed for `total` records at `limit` per page.
#[must_use]
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }

    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// The sliding window of page numbers for the pagination widget.
///
/// Empty when there is a single page or none. Otherwise the window is centred
/// on `current` and shifted back from the ends so that exactly `max_buttons`
/// pages are shown whenever that many exist.
#[must_use]
pub fn page_window(current: u32, total_pages: u32, max_buttons: u32) -> Vec<u32> {
    if total_pages <= 1 || max_buttons == 0 {
        return Vec::new();
    }

    let mut start = current.saturating_sub(max_buttons / 2).max(1);
    let end = start.saturating_add(max_buttons - 1).min(total_pages);

    if end.saturating_sub(start) < max_buttons - 1 {
        start = end.saturating_sub(max_buttons - 1).max(1);
    }

    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_unfiltered_first_page() {
        let query = ProductsQuery::default();

        assert_eq!(query.search, "");
        assert_eq!(query.category, DEFAULT_CATEGORY);
        assert_eq!(query.page, 1);
        assert_eq!(query.sort_by, "");
        assert_eq!(query.order, SortOrder::Asc);
    }

    #[test]
    fn from_pairs_reads_known_keys() {
        let query = ProductsQuery::from_pairs([
            ("search", "phone"),
            ("category", "smartphones"),
            ("page", "3"),
            ("sortBy", "price"),
            ("order", "desc"),
            ("utm_source", "ignored"),
        ]);

        assert_eq!(query.search, "phone");
        assert_eq!(query.category, "smartphones");
        assert_eq!(query.page, 3);
        assert_eq!(query.sort_by, "price");
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn from_pairs_falls_back_on_bad_values() {
        let query = ProductsQuery::from_pairs([("page", "zero"), ("order", "sideways")]);

        assert_eq!(query.page, 1);
        assert_eq!(query.order, SortOrder::Asc);
    }

    #[test]
    fn from_pairs_rejects_page_below_one() {
        let query = ProductsQuery::from_pairs([("page", "0")]);

        assert_eq!(query.page, 1);
    }

    #[test]
    fn to_pairs_omits_defaults() {
        assert!(ProductsQuery::default().to_pairs().is_empty());

        let query = ProductsQuery {
            search: "phone".to_owned(),
            page: 2,
            ..ProductsQuery::default()
        };

        assert_eq!(
            query.to_pairs(),
            vec![("search", "phone".to_owned()), ("page", "2".to_owned())]
        );
    }

    #[test]
    fn pairs_round_trip() {
        let query = ProductsQuery {
            search: "watch".to_owned(),
            category: "mens-watches".to_owned(),
            page: 4,
            sort_by: "price".to_owned(),
            order: SortOrder::Desc,
        };

        let pairs = query.to_pairs();
        let reparsed =
            ProductsQuery::from_pairs(pairs.iter().map(|(key, value)| (*key, value.as_str())));

        assert_eq!(reparsed, query);
    }

    #[test]
    fn skip_is_zero_based_page_offset() {
        let query = ProductsQuery {
            page: 3,
            ..ProductsQuery::default()
        };

        assert_eq!(query.skip(30), 60);
        assert_eq!(ProductsQuery::default().skip(30), 0);
    }

    #[test]
    fn active_filter_count_ignores_page_and_order() {
        let query = ProductsQuery {
            search: "phone".to_owned(),
            category: "smartphones".to_owned(),
            page: 9,
            sort_by: String::new(),
            order: SortOrder::Desc,
        };

        assert_eq!(query.active_filter_count(), 2);
    }

    #[test]
    fn to_request_carries_only_active_fields() {
        let request = ProductsQuery::default().to_request(30);

        assert_eq!(request.limit, 30);
        assert_eq!(request.skip, 0);
        assert_eq!(request.search, None);
        assert_eq!(request.category, None);
        assert_eq!(request.sort_by, None);
        assert_eq!(request.order, None);

        let query = ProductsQuery {
            sort_by: "price".to_owned(),
            order: SortOrder::Desc,
            page: 2,
            ..ProductsQuery::default()
        };
        let request = query.to_request(30);

        assert_eq!(request.skip, 30);
        assert_eq!(request.sort_by.as_deref(), Some("price"));
        assert_eq!(request.order, Some(SortOrder::Desc));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 30), 0);
        assert_eq!(total_pages(30, 30), 1);
        assert_eq!(total_pages(31, 30), 2);
        assert_eq!(total_pages(194, 30), 7);
    }

    #[test]
    fn page_window_is_empty_for_single_page() {
        assert_eq!(page_window(1, 1, 5), Vec::<u32>::new());
        assert_eq!(page_window(1, 0, 5), Vec::<u32>::new());
    }

    #[test]
    fn page_window_shows_all_pages_when_few() {
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
    }

    #[test]
    fn page_window_centres_on_current_page() {
        assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn page_window_clamps_at_the_start() {
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(2, 10, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn page_window_clamps_at_the_end() {
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(9, 10, 5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn page_window_handles_current_past_the_end() {
        assert_eq!(page_window(50, 10, 5), vec![6, 7, 8, 9, 10]);
    }
}
