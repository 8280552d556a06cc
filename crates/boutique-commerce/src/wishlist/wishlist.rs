//! Wishlist of saved products.

use crate::catalog::Product;
use crate::collection::{AddOutcome, CollectionEntry, CollectionManager};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use boutique_cache::Cache;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

/// A saved product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Money,
}

impl WishlistItem {
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            price: product.price,
        }
    }
}

impl CollectionEntry for WishlistItem {
    type Key = ProductId;

    fn key(&self) -> ProductId {
        self.product_id.clone()
    }

    /// Saving a product twice changes nothing.
    fn merge(&mut self, _incoming: Self) -> Result<bool, CommerceError> {
        Ok(false)
    }
}

/// Products the shopper saved for later, persisted to a storage slot.
#[derive(Debug)]
pub struct Wishlist {
    items: CollectionManager<WishlistItem>,
    currency: Currency,
}

impl Wishlist {
    /// Load the wishlist stored in `slot`.
    pub fn load(cache: Cache, slot: impl Into<String>, currency: Currency) -> Self {
        Self {
            items: CollectionManager::load(cache, slot),
            currency,
        }
    }

    /// Save a product. Saving it again is a no-op.
    pub fn add(&mut self, product: &Product) -> Result<AddOutcome, CommerceError> {
        let outcome = self.items.add(WishlistItem::from_product(product))?;
        if outcome == AddOutcome::Inserted {
            info!(product_id = %product.id, "added to wishlist");
        }
        Ok(outcome)
    }

    /// Forget a product. Returns false if it was not saved.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<bool, CommerceError> {
        let removed = self.items.remove(product_id)?;
        if removed {
            info!(%product_id, "removed from wishlist");
        }
        Ok(removed)
    }

    /// Add the product if absent, remove it if present. Returns whether the
    /// product is saved afterwards.
    pub fn toggle(&mut self, product: &Product) -> Result<bool, CommerceError> {
        if self.contains(&product.id) {
            self.remove(&product.id)?;
            Ok(false)
        } else {
            self.add(product)?;
            Ok(true)
        }
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.contains(product_id)
    }

    pub fn items(&self) -> &[WishlistItem] {
        self.items.entries()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of saved products.
    pub fn item_count(&self) -> u64 {
        self.items.total_count()
    }

    /// Combined price of every saved product, computed on every call.
    pub fn total_value(&self) -> Result<Money, CommerceError> {
        Money::try_sum(self.items().iter().map(|i| &i.price), self.currency)
            .ok_or(CommerceError::Overflow)
    }

    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.items.clear()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<WishlistItem>> {
        self.items.subscribe()
    }
}
