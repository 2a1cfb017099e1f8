//! Catalog
//!
//! HTTP client for the remote product catalog. Read-only: listings (with
//! search, category, pagination and sorting), single products, and the
//! category index. Errors are mapped to a small taxonomy the UI layer can
//! translate into user-facing messages.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{
    products::{Category, Product, ProductListResponse},
    query::SortOrder,
};

/// Default public catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default page size for product listings.
pub const DEFAULT_LIMIT: u32 = 30;

/// Errors from the catalog interface.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The catalog is rate-limiting us.
    #[error("too many requests, please try again later")]
    RateLimited,

    /// The catalog itself failed.
    #[error("server error, please try again later (status {0})")]
    Server(StatusCode),

    /// Any other non-success status.
    #[error("unexpected response status {0}")]
    Http(StatusCode),

    /// The response body did not match the expected schema.
    #[error("invalid data format received from catalog")]
    InvalidBody(#[from] serde_json::Error),

    /// Transport-level failure.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// The configured base URL does not parse.
    #[error("invalid catalog url: {0}")]
    BadUrl(String),
}

/// Parameters for a product listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductsRequest {
    pub limit: u32,
    pub skip: u32,
    /// Free-text search; routes the request to the search endpoint.
    pub search: Option<String>,
    /// Category slug; routes the request to the category endpoint. Ignored
    /// when `search` is set.
    pub category: Option<String>,
    pub sort_by: Option<String>,
    /// Only sent when `sort_by` is set.
    pub order: Option<SortOrder>,
}

impl Default for ProductsRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: 0,
            search: None,
            category: None,
            sort_by: None,
            order: None,
        }
    }
}

/// The read-only catalog interface the rest of the application consumes.
#[automock]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of products matching the request.
    async fn products(
        &self,
        request: &ProductsRequest,
    ) -> Result<ProductListResponse, CatalogError>;

    /// Fetch a single product by id.
    async fn product(&self, id: u64) -> Result<Product, CatalogError>;

    /// Fetch the category index.
    async fn categories(&self) -> Result<Vec<Category>, CatalogError>;
}

/// HTTP client for a DummyJSON-shaped catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: Client,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    /// Client against the default public endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a specific endpoint (no trailing slash).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> Result<Url, CatalogError> {
        Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|err| CatalogError::BadUrl(err.to_string()))
    }

    /// Build the listing URL for a request.
    ///
    /// Search takes priority over category; both fall back to the plain
    /// listing endpoint. Pagination is always appended, sorting only when a
    /// sort field is present.
    fn products_url(&self, request: &ProductsRequest) -> Result<Url, CatalogError> {
        let mut url = if let Some(search) = &request.search {
            let mut url = self.url("/products/search")?;
            url.query_pairs_mut().append_pair("q", search);
            url
        } else if let Some(category) = &request.category {
            self.url(&format!("/products/category/{category}"))?
        } else {
            self.url("/products")?
        };

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &request.limit.to_string());
            pairs.append_pair("skip", &request.skip.to_string());

            if let Some(sort_by) = &request.sort_by {
                pairs.append_pair("sortBy", sort_by);
                pairs.append_pair("order", request.order.unwrap_or_default().as_str());
            }
        }

        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        debug!(%url, "catalog request");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(status_error(status));
        }

        // Parse from text rather than `Response::json` so schema mismatches
        // are distinguishable from transport failures.
        let body = response.text().await?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn products(
        &self,
        request: &ProductsRequest,
    ) -> Result<ProductListResponse, CatalogError> {
        let url = self.products_url(request)?;
        self.fetch(url).await
    }

    async fn product(&self, id: u64) -> Result<Product, CatalogError> {
        let url = self.url(&format!("/products/{id}"))?;
        self.fetch(url).await
    }

    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = self.url("/products/categories")?;
        self.fetch(url).await
    }
}

/// Map a non-success status to the catalog error taxonomy.
fn status_error(status: StatusCode) -> CatalogError {
    match status {
        StatusCode::NOT_FOUND => CatalogError::NotFound,
        StatusCode::TOO_MANY_REQUESTS => CatalogError::RateLimited,
        status if status.is_server_error() => CatalogError::Server(status),
        status => CatalogError::Http(status),
    }
}
