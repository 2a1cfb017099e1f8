//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartStore, LineItem, STORAGE_KEY},
    catalog::{
        CatalogApi, CatalogClient, CatalogError, DEFAULT_BASE_URL, DEFAULT_LIMIT, ProductsRequest,
    },
    pricing::{OrderSummary, cart_totals, discounted_unit_price, line_total, round_display},
    products::{Category, Product, ProductListResponse, Review},
    query::{DEFAULT_CATEGORY, ProductsQuery, SortOrder, page_window, total_pages},
    storage::{CartStorage, FileStorage, MemoryStorage, StorageError},
};
