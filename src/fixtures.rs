//! Fixtures
//!
//! Canned catalog records for tests and demos.

use rust_decimal::Decimal;

use crate::products::{Dimensions, Product, ProductMeta};

/// A plausible catalog product with the given id and plenty of stock.
#[must_use]
pub fn product(id: u64) -> Product {
    product_with(id, Decimal::new(1999, 2), Decimal::ZERO, 100)
}

/// A catalog product with the given id, price, discount percentage and stock.
#[must_use]
pub fn product_with(
    id: u64,
    price: Decimal,
    discount_percentage: Decimal,
    stock: u32,
) -> Product {
    Product {
        id,
        title: format!("Test Product {id}"),
        description: "A test product.".to_owned(),
        category: "electronics".to_owned(),
        price,
        discount_percentage,
        rating: 4.5,
        stock,
        tags: vec!["test".to_owned()],
        brand: Some("Acme".to_owned()),
        sku: format!("SKU-{id:04}"),
        weight: 1.0,
        dimensions: Dimensions {
            width: 10.0,
            height: 10.0,
            depth: 10.0,
        },
        warranty_information: "1 year warranty".to_owned(),
        shipping_information: "Ships in 1-2 days".to_owned(),
        availability_status: "In Stock".to_owned(),
        reviews: Vec::new(),
        return_policy: "30 days return policy".to_owned(),
        minimum_order_quantity: 1,
        meta: ProductMeta {
            created_at: "2024-01-01T00:00:00.000Z".to_owned(),
            updated_at: "2024-01-01T00:00:00.000Z".to_owned(),
            barcode: format!("{id:013}"),
            qr_code: "https://example.com/qr.png".to_owned(),
        },
        thumbnail: format!("https://example.com/products/{id}/thumbnail.jpg"),
        images: vec![format!("https://example.com/products/{id}/1.jpg")],
    }
}
