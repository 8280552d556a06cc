//! The storefront composition root.

use crate::config::StorefrontConfig;
use anyhow::Context;
use boutique_cache::{Cache, FileStorage, MemoryStorage, Storage};
use boutique_commerce::prelude::*;
use boutique_notify::{ToastId, ToastQueue};
use std::sync::Arc;
use tracing::{info, warn};

/// Catalog, cart, wishlist and toasts for one shopper session.
///
/// Everything is built explicitly from a [`StorefrontConfig`] and an
/// injected [`Storage`]; nothing is global.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use boutique_sdk::prelude::*;
///
/// let mut store = Storefront::new(
///     StorefrontConfig::default(),
///     Catalog::sample().unwrap(),
///     Arc::new(MemoryStorage::new()),
/// )
/// .unwrap();
///
/// let selection = VariantSelection::new().with_size("M").with_color("Blanc");
/// store.add_to_cart(&ProductId::new("1"), &selection).unwrap();
/// assert_eq!(store.cart().item_count(), 1);
/// assert_eq!(store.toasts().len(), 1);
/// ```
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Cart,
    wishlist: Wishlist,
    toasts: ToastQueue,
}

impl Storefront {
    /// Assemble a storefront around an existing catalog and storage backend.
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: Arc<dyn Storage>,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        if catalog.currency() != config.catalog.currency {
            anyhow::bail!(
                "catalog is priced in {} but the storefront is configured for {}",
                catalog.currency().code(),
                config.catalog.currency.code()
            );
        }

        let cache = Cache::new(storage);
        let currency = catalog.currency();
        let cart = Cart::load(cache.clone(), config.storage.cart_key(), currency);
        let wishlist = Wishlist::load(cache, config.storage.wishlist_key(), currency);
        let toasts = ToastQueue::new(config.toasts.queue_config());

        info!(
            products = catalog.len(),
            cart_lines = cart.unique_item_count(),
            wishlist = wishlist.len(),
            "storefront ready"
        );

        Ok(Self {
            config,
            catalog,
            cart,
            wishlist,
            toasts,
        })
    }

    /// Build the catalog and storage named by `config`.
    ///
    /// Without `catalog.path` the built-in sample catalog is used; without
    /// `storage.dir` collections live in memory.
    pub fn from_config(config: StorefrontConfig) -> anyhow::Result<Self> {
        let currency = config.catalog.currency;
        let catalog = match &config.catalog.path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading catalog {}", path.display()))?;
                Catalog::from_json(&json, currency)
                    .with_context(|| format!("loading catalog {}", path.display()))?
            }
            None => {
                if currency != Currency::EUR {
                    warn!(currency = currency.code(), "sample catalog is priced in EUR");
                }
                Catalog::sample().context("loading sample catalog")?
            }
        };

        let storage: Arc<dyn Storage> = match &config.storage.dir {
            Some(dir) => Arc::new(
                FileStorage::open(dir)
                    .with_context(|| format!("opening storage {}", dir.display()))?,
            ),
            None => Arc::new(MemoryStorage::new()),
        };

        Self::new(config, catalog, storage)
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn wishlist_mut(&mut self) -> &mut Wishlist {
        &mut self.wishlist
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// Products to list for a navigation selector and filter state.
    ///
    /// The price ceiling is first clamped to the catalog's price range.
    pub fn browse(
        &self,
        selector: &CategorySelector,
        config: &FilterConfiguration,
    ) -> Vec<&Product> {
        let config = config.clone().clamped_to(&self.catalog);
        filter_and_sort_refs(self.catalog.products(), selector, &config)
    }

    /// Facet values for the filter sidebar, computed over the products the
    /// selector lets through.
    pub fn facets(&self, selector: &CategorySelector, config: &FilterConfiguration) -> FacetSummary {
        let products: Vec<Product> = self
            .catalog
            .iter()
            .filter(|p| selector.matches(p))
            .cloned()
            .collect();
        FacetSummary::from_products(&products, config)
    }

    /// Add a product to the cart and confirm with a toast.
    ///
    /// Validation failures push an error toast and are returned unchanged.
    pub fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        selection: &VariantSelection,
    ) -> Result<CartKey, CommerceError> {
        let result = self
            .catalog
            .require(product_id)
            .and_then(|product| {
                let key = self.cart.add_product(product, selection)?;
                Ok((key, product.name.clone()))
            });

        match result {
            Ok((key, name)) => {
                self.toasts.success(format!("{name} ajouté au panier"));
                Ok(key)
            }
            Err(err) => {
                warn!(%product_id, error = %err, "add to cart rejected");
                self.toasts.error(cart_error_message(&err));
                Err(err)
            }
        }
    }

    /// Save or unsave a product and confirm with a toast. Returns whether the
    /// product is saved afterwards.
    pub fn toggle_wishlist(&mut self, product_id: &ProductId) -> Result<bool, CommerceError> {
        let product = match self.catalog.require(product_id) {
            Ok(product) => product,
            Err(err) => {
                self.toasts.error(err.to_string());
                return Err(err);
            }
        };

        let saved = self.wishlist.toggle(product)?;
        let text = if saved {
            format!("{} ajouté aux favoris", product.name)
        } else {
            format!("{} retiré des favoris", product.name)
        };
        self.toasts.info(text);
        Ok(saved)
    }

    /// Remove a toast by id.
    pub fn dismiss_toast(&self, id: ToastId) -> bool {
        self.toasts.dismiss(id)
    }
}

fn cart_error_message(err: &CommerceError) -> String {
    match err {
        CommerceError::MissingVariant(attribute) if attribute == "size" => {
            "Veuillez choisir une taille".to_string()
        }
        CommerceError::MissingVariant(attribute) if attribute == "color" => {
            "Veuillez choisir une couleur".to_string()
        }
        CommerceError::QuantityExceedsLimit(_, max) => {
            format!("Quantité maximale atteinte ({max})")
        }
        other => other.to_string(),
    }
}
