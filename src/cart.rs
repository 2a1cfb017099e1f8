//! Cart
//!
//! The cart state manager: owns the line items, keeps the derived aggregates
//! in step with them, and writes every snapshot through to durable storage.
//!
//! In-memory state is the source of truth for the running session. Storage is
//! best-effort durability only: read and write failures are logged and
//! swallowed, never surfaced to callers of the mutation API.

use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{pricing::cart_totals, products::Product, storage::CartStorage};

/// Fixed storage key the cart snapshot lives under.
pub const STORAGE_KEY: &str = "arts-cart";

/// Version tag written into the persisted envelope. Anything else fails soft
/// to an empty cart.
const SCHEMA_VERSION: u32 = 0;

/// One product's entry in the cart, keyed by product id.
///
/// All fields other than `quantity` are a snapshot of the product at add-time
/// and are never re-validated against the catalog. Field names follow the
/// persisted JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: u64,
    pub title: String,
    /// Unit price before discount, as snapshotted.
    pub price: Decimal,
    pub thumbnail: String,
    /// Held within `1..=stock` while the item is present.
    pub quantity: u32,
    /// Available stock as snapshotted; the clamp ceiling for this item.
    pub stock: u32,
    pub discount_percentage: Decimal,
    /// Absent from snapshots written by older storefront versions.
    #[serde(default)]
    pub category: String,
}

/// Persisted envelope around the item collection.
///
/// Aggregates are deliberately not persisted; they are recomputed from the
/// items on every load so a stale persisted total can never drift from them.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedCart {
    state: PersistedState,
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    items: Vec<LineItem>,
}

/// The cart state manager.
///
/// Created empty and unhydrated; call [`CartStore::hydrate`] once at startup
/// to restore any persisted snapshot. Until then reads reflect a cart in an
/// indeterminate loading state and totals should not be trusted.
pub struct CartStore {
    items: Vec<LineItem>,
    total_items: u64,
    total_price: Decimal,
    hydrated: bool,
    storage: Arc<dyn CartStorage>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("total_items", &self.total_items)
            .field("total_price", &self.total_price)
            .field("hydrated", &self.hydrated)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create an empty, unhydrated cart backed by the given storage.
    #[must_use]
    pub fn new(storage: Arc<dyn CartStorage>) -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_price: Decimal::ZERO,
            hydrated: false,
            storage,
        }
    }

    /// Load the persisted snapshot, if any, and mark the cart hydrated.
    ///
    /// One-shot: later calls are no-ops. Every failure path (missing key,
    /// unreadable backend, unparseable or wrong-version payload) degrades to
    /// an empty cart; `hydrated` becomes true regardless. Aggregates are
    /// recomputed from the restored items, never read from storage.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }

        self.items = self.load_persisted();
        self.recompute();
        self.hydrated = true;
    }

    fn load_persisted(&self) -> Vec<LineItem> {
        let raw = match self.storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(%err, "cart storage read failed; starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<PersistedCart>(&raw) {
            Ok(persisted) if persisted.version == SCHEMA_VERSION => persisted.state.items,
            Ok(persisted) => {
                warn!(
                    version = persisted.version,
                    "persisted cart has unknown schema version; starting empty"
                );
                Vec::new()
            }
            Err(err) => {
                warn!(%err, "persisted cart did not parse; starting empty");
                Vec::new()
            }
        }
    }

    /// Add `quantity` of a product to the cart.
    ///
    /// Merges by product id: an existing line item has its quantity raised by
    /// `quantity`, clamped to its snapshotted stock; otherwise a new line item
    /// is created with `min(quantity, product.stock)`. Clamping is silent —
    /// callers that want to warn the user pre-check against the stock figure
    /// themselves.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(existing) = self.items.iter_mut().find(|item| item.id == product.id) {
            // The clamp ceiling is the stock snapshotted at insertion, not a
            // fresh figure from the caller.
            existing.quantity = existing.quantity.saturating_add(quantity).min(existing.stock);
        } else {
            let quantity = quantity.min(product.stock);

            // A zero-stock product leaves nothing to add.
            if quantity == 0 {
                return;
            }

            self.items.push(LineItem {
                id: product.id,
                title: product.title.clone(),
                price: product.price,
                thumbnail: product.thumbnail.clone(),
                quantity,
                stock: product.stock,
                discount_percentage: product.discount_percentage,
                category: product.category.clone(),
            });
        }

        self.commit();
    }

    /// Remove the line item with the given product id. No-op when absent.
    pub fn remove_item(&mut self, id: u64) {
        self.items.retain(|item| item.id != id);
        self.commit();
    }

    /// Set the quantity of an existing line item.
    ///
    /// No-op when no line item has this id. A quantity of zero or less removes
    /// the item; anything else is clamped to the item's snapshotted stock.
    pub fn update_quantity(&mut self, id: u64, quantity: i64) {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return;
        };

        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        if let Some(item) = self.items.get_mut(index) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX).min(item.stock);
        }

        self.commit();
    }

    /// Empty the cart and reset the aggregates.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Sum of discounted line totals.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Whether the persisted snapshot has been loaded (or confirmed absent).
    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    fn commit(&mut self) {
        self.recompute();
        self.persist();
    }

    fn recompute(&mut self) {
        let (count, total) = cart_totals(&self.items);
        self.total_items = count;
        self.total_price = total;
    }

    /// Write the whole current snapshot through to storage, best-effort.
    fn persist(&self) {
        let envelope = PersistedCart {
            state: PersistedState {
                items: self.items.clone(),
            },
            version: SCHEMA_VERSION,
        };

        let serialized = match serde_json::to_string(&envelope) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(%err, "cart snapshot failed to serialize; skipping write");
                return;
            }
        };

        if let Err(err) = self.storage.set(STORAGE_KEY, &serialized) {
            warn!(%err, "cart storage write failed; keeping in-memory state");
        }
    }
}
