//! Cart and cart item types.

use crate::catalog::Product;
use crate::collection::{AddOutcome, CollectionEntry, CollectionManager};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use boutique_cache::Cache;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_ITEM: u32 = 99;

/// Identity of a cart line: one product in one size and one color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl CartKey {
    pub fn new(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Unit price at the time the product was added.
    pub unit_price: Money,
    pub size: String,
    pub color: String,
    pub quantity: u32,
}

impl CartItem {
    /// Total price of the line (unit price times quantity).
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

impl CollectionEntry for CartItem {
    type Key = CartKey;

    fn key(&self) -> CartKey {
        CartKey::new(self.product_id.clone(), self.size.clone(), self.color.clone())
    }

    fn merge(&mut self, incoming: Self) -> Result<bool, CommerceError> {
        let new_quantity = self
            .quantity
            .checked_add(incoming.quantity)
            .ok_or(CommerceError::Overflow)?;

        if new_quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                i64::from(new_quantity),
                i64::from(MAX_QUANTITY_PER_ITEM),
            ));
        }

        self.quantity = new_quantity;
        Ok(true)
    }

    fn count(&self) -> u64 {
        u64::from(self.quantity)
    }

    fn validate(&self) -> Result<(), CommerceError> {
        if self.quantity == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }
        if self.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                i64::from(self.quantity),
                i64::from(MAX_QUANTITY_PER_ITEM),
            ));
        }
        Ok(())
    }
}

/// Size, color and quantity chosen on the product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSelection {
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
}

impl Default for VariantSelection {
    fn default() -> Self {
        Self {
            size: None,
            color: None,
            quantity: 1,
        }
    }
}

impl VariantSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Resolve the selection against the product's options.
    ///
    /// An attribute may be left out only when the product offers a single
    /// value for it.
    pub fn resolve(&self, product: &Product) -> Result<CartKey, CommerceError> {
        let size = pick(product, &product.sizes, self.size.as_deref(), "size")?;
        let color = pick(product, &product.colors, self.color.as_deref(), "color")?;
        Ok(CartKey::new(product.id.clone(), size, color))
    }
}

fn pick(
    product: &Product,
    options: &[String],
    chosen: Option<&str>,
    attribute: &str,
) -> Result<String, CommerceError> {
    match chosen {
        Some(value) if options.iter().any(|o| o == value) => Ok(value.to_string()),
        Some(value) => Err(CommerceError::InvalidVariant {
            product_id: product.id.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        }),
        None => match options {
            [only] => Ok(only.clone()),
            _ => Err(CommerceError::MissingVariant(attribute.to_string())),
        },
    }
}

/// A shopping cart persisted to a storage slot.
#[derive(Debug)]
pub struct Cart {
    items: CollectionManager<CartItem>,
    currency: Currency,
}

impl Cart {
    /// Load the cart stored in `slot`.
    pub fn load(cache: Cache, slot: impl Into<String>, currency: Currency) -> Self {
        Self {
            items: CollectionManager::load(cache, slot),
            currency,
        }
    }

    /// Add a product with the shopper's variant selection.
    ///
    /// Returns an error if:
    /// - a size or color must be chosen and was not
    /// - the chosen size or color is not offered
    /// - quantity is zero or the line would exceed MAX_QUANTITY_PER_ITEM
    pub fn add_product(
        &mut self,
        product: &Product,
        selection: &VariantSelection,
    ) -> Result<CartKey, CommerceError> {
        if selection.quantity == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }
        let key = selection.resolve(product)?;

        self.add_item(CartItem {
            product_id: key.product_id.clone(),
            product_name: product.name.clone(),
            unit_price: product.price,
            size: key.size.clone(),
            color: key.color.clone(),
            quantity: selection.quantity,
        })?;
        Ok(key)
    }

    /// Add an already resolved line.
    pub fn add_item(&mut self, item: CartItem) -> Result<AddOutcome, CommerceError> {
        if item.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }
        let product_id = item.product_id.clone();
        let quantity = item.quantity;
        let outcome = self.items.add(item)?;
        info!(%product_id, quantity, ?outcome, "added to cart");
        Ok(outcome)
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Returns false if the line
    /// does not exist.
    pub fn update_quantity(&mut self, key: &CartKey, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return self.remove_item(key);
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q <= MAX_QUANTITY_PER_ITEM)
            .ok_or(CommerceError::QuantityExceedsLimit(
                quantity,
                i64::from(MAX_QUANTITY_PER_ITEM),
            ))?;

        self.items.update_with(key, |item| item.quantity = quantity)
    }

    /// Remove a line. Removing a missing line is a no-op.
    pub fn remove_item(&mut self, key: &CartKey) -> Result<bool, CommerceError> {
        let removed = self.items.remove(key)?;
        if removed {
            info!(product_id = %key.product_id, size = %key.size, color = %key.color, "removed from cart");
        }
        Ok(removed)
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.items.clear()
    }

    pub fn contains(&self, key: &CartKey) -> bool {
        self.items.contains(key)
    }

    pub fn get_item(&self, key: &CartKey) -> Option<&CartItem> {
        self.items.get(key)
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        self.items.entries()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.total_count()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Sum of line totals, computed on every call.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let totals = self
            .items()
            .iter()
            .map(CartItem::total_price)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(totals.iter(), self.currency).ok_or(CommerceError::Overflow)
    }

    /// Watch the cart lines.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.items.subscribe()
    }
}
