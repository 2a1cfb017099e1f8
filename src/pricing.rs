//! Pricing
//!
//! Derived money math over cart line items. Everything here is recomputed
//! from the item collection on demand; nothing is stored truth.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::cart::LineItem;

/// Flat tax rate used for the display estimate (10%).
fn tax_rate() -> Decimal {
    Decimal::new(1, 1)
}

/// Flat-rate shipping charge.
fn shipping_flat() -> Decimal {
    Decimal::new(599, 2)
}

/// Discounted order total above which shipping is free.
fn free_shipping_threshold() -> Decimal {
    Decimal::from(50)
}

/// The unit price of an item after its discount percentage is applied.
pub fn discounted_unit_price(price: Decimal, discount_percentage: Decimal) -> Decimal {
    price * (Decimal::ONE - discount_percentage / Decimal::ONE_HUNDRED)
}

/// The discounted total for one line item.
pub fn line_total(item: &LineItem) -> Decimal {
    discounted_unit_price(item.price, item.discount_percentage) * Decimal::from(item.quantity)
}

/// Recompute the cart aggregates from the line items: the summed quantity and
/// the summed discounted price.
pub fn cart_totals(items: &[LineItem]) -> (u64, Decimal) {
    let count = items.iter().map(|item| u64::from(item.quantity)).sum();
    let total = items.iter().map(line_total).sum();

    (count, total)
}

/// Round a monetary amount to two decimal places for display.
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Display estimate for an order: pre-discount subtotal, savings, flat tax and
/// shipping figures, and the resulting grand total.
///
/// These are fixed-rate presentation numbers, not a tax engine.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    /// Sum of `price × quantity` before discounts.
    pub subtotal: Decimal,
    /// Amount saved through item discounts.
    pub savings: Decimal,
    /// Flat 10% estimate on the discounted total.
    pub estimated_tax: Decimal,
    /// Flat-rate shipping; zero once the discounted total clears the
    /// free-shipping threshold.
    pub shipping: Decimal,
    /// How much more spend would make shipping free, when it is not already.
    pub free_shipping_gap: Option<Decimal>,
    /// Discounted total plus tax and shipping.
    pub total: Decimal,
}

impl OrderSummary {
    /// Build the summary for a set of line items.
    ///
    /// An empty cart yields an all-zero summary rather than a bare shipping
    /// charge.
    #[must_use]
    pub fn for_items(items: &[LineItem]) -> Self {
        if items.is_empty() {
            return Self {
                subtotal: Decimal::ZERO,
                savings: Decimal::ZERO,
                estimated_tax: Decimal::ZERO,
                shipping: Decimal::ZERO,
                free_shipping_gap: None,
                total: Decimal::ZERO,
            };
        }

        let subtotal: Decimal = items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum();

        let (_, discounted_total) = cart_totals(items);

        let savings = subtotal - discounted_total;
        let estimated_tax = discounted_total * tax_rate();

        let shipping = if discounted_total > free_shipping_threshold() {
            Decimal::ZERO
        } else {
            shipping_flat()
        };

        let free_shipping_gap = (shipping > Decimal::ZERO)
            .then(|| free_shipping_threshold() - discounted_total)
            .filter(|gap| *gap > Decimal::ZERO);

        Self {
            subtotal,
            savings,
            estimated_tax,
            shipping,
            free_shipping_gap,
            total: discounted_total + estimated_tax + shipping,
        }
    }
}
