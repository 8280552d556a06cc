//! Storefront domain types and logic for Boutique.
//!
//! - **Catalog**: immutable products and the catalog store
//! - **Search**: category selector, facet filters, sorting, facet counts
//! - **Collections**: the persisted add/remove pattern behind cart and wishlist
//! - **Cart** / **Wishlist**: the two collections a shopper builds
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use boutique_cache::{Cache, MemoryStorage};
//! use boutique_commerce::prelude::*;
//!
//! let catalog = Catalog::sample().unwrap();
//!
//! // Women's products under 70 EUR, cheapest first
//! let config = FilterConfiguration::new()
//!     .with_price_ceiling(Money::from_decimal(70.0, Currency::EUR))
//!     .with_sort(SortKey::PriceAscending);
//! let listing = filter_and_sort(catalog.products(), &CategorySelector::parse("femme"), &config);
//! assert_eq!(listing.len(), 2);
//!
//! // Put the first one in the cart
//! let cache = Cache::new(Arc::new(MemoryStorage::new()));
//! let mut cart = Cart::load(cache, "boutique:cart", Currency::EUR);
//! cart.add_product(&listing[0], &VariantSelection::new().with_size("M").with_color("Blanc"))
//!     .unwrap();
//! assert_eq!(cart.item_count(), 1);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod collection;
pub mod search;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Category, Product, ProductRecord, ProductType};

    // Search
    pub use crate::search::{
        filter_and_sort, filter_and_sort_refs, CategorySelector, FacetSummary, FacetValue,
        FilterConfiguration, RawFilter, SortKey,
    };

    // Collections
    pub use crate::cart::{Cart, CartItem, CartKey, VariantSelection, MAX_QUANTITY_PER_ITEM};
    pub use crate::collection::{AddOutcome, CollectionEntry, CollectionManager};
    pub use crate::wishlist::{Wishlist, WishlistItem};
}
