//! Products
//!
//! Wire types for the remote product catalog. Field names follow the catalog's
//! JSON (camelCase); prices and percentages deserialize into [`Decimal`] from
//! the plain JSON numbers the API sends.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Physical dimensions of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Catalog bookkeeping metadata attached to a product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-update timestamp.
    pub updated_at: String,
    pub barcode: String,
    pub qr_code: String,
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: String,
    /// ISO 8601 date string.
    pub date: String,
    pub reviewer_name: String,
    pub reviewer_email: String,
}

/// A full product record as served by the catalog.
///
/// The cart copies the fields it needs from one of these at add-time and never
/// re-validates against the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Unit price before any discount.
    pub price: Decimal,
    /// Discount as a percentage in `0..=100`, normalised on the way in:
    /// values below one arrive as decimal fractions and are scaled ×100.
    #[serde(deserialize_with = "normalised_percentage")]
    pub discount_percentage: Decimal,
    /// Average rating, 0 to 5.
    pub rating: f64,
    /// Units currently available.
    pub stock: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub brand: Option<String>,
    pub sku: String,
    pub weight: f64,
    pub dimensions: Dimensions,
    pub warranty_information: String,
    pub shipping_information: String,
    pub availability_status: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub return_policy: String,
    pub minimum_order_quantity: u32,
    pub meta: ProductMeta,
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// One page of products from a listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    /// Total matching records across all pages.
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// A product category as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
    pub url: String,
}

/// Deserialize a discount percentage, normalising the catalog's two formats.
///
/// Some records carry the discount as a decimal fraction (`0.16` for 16%);
/// values below one are scaled to the percentage form.
fn normalised_percentage<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = <Decimal as Deserialize>::deserialize(deserializer)?;

    if raw < Decimal::ONE {
        Ok(raw * Decimal::ONE_HUNDRED)
    } else {
        Ok(raw)
    }
}
