//! Filter configuration and sort keys.

use crate::catalog::{Catalog, Category, Product, ProductType};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order, which is already newest first.
    #[default]
    Newest,
    /// Sort by price, low to high.
    PriceAscending,
    /// Sort by price, high to low.
    PriceDescending,
    /// Sort by highest rated.
    RatingDescending,
}

impl SortKey {
    /// Parse a sort key, falling back to `Newest` for unknown values.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "price-asc" | "price_asc" | "price-ascending" => Self::PriceAscending,
            "price-desc" | "price_desc" | "price-descending" => Self::PriceDescending,
            "rating" | "rating-desc" | "rating-descending" => Self::RatingDescending,
            "newest" => Self::Newest,
            other => {
                debug!(sort = other, "unknown sort key, using newest");
                Self::Newest
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAscending => "price-asc",
            Self::PriceDescending => "price-desc",
            Self::RatingDescending => "rating",
        }
    }

    /// Stable in-place sort. `Newest` leaves the order untouched.
    pub fn apply(&self, products: &mut [&Product]) {
        match self {
            Self::Newest => {}
            Self::PriceAscending => {
                products.sort_by(|a, b| a.price.amount_cents.cmp(&b.price.amount_cents))
            }
            Self::PriceDescending => {
                products.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
            }
            Self::RatingDescending => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
    }
}

/// Top-level navigation gate applied before the facet filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategorySelector {
    #[default]
    All,
    Category(Category),
    Accessories,
    Sale,
}

impl CategorySelector {
    /// Parse a navigation selector. Unknown values select everything.
    pub fn parse(s: &str) -> Self {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "all" | "tout" | "" => Self::All,
            "accessories" | "accessoires" => Self::Accessories,
            "sale" | "soldes" => Self::Sale,
            other => match Category::from_str(other) {
                Some(category) => Self::Category(category),
                None => {
                    debug!(selector = other, "unknown category selector, showing all");
                    Self::All
                }
            },
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == *category,
            Self::Accessories => product.product_type == ProductType::Accessories,
            Self::Sale => product.is_on_sale,
        }
    }
}

/// Facet selections, price ceiling and sort order for a product listing.
///
/// Empty facet sets impose no restriction. The price range lower bound is
/// always zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterConfiguration {
    pub categories: BTreeSet<Category>,
    pub types: BTreeSet<ProductType>,
    pub sizes: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    /// Inclusive upper bound; `None` means no ceiling.
    pub price_ceiling: Option<Money>,
    pub sort: SortKey,
}

impl FilterConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a loosely typed filter, dropping values that name no known
    /// category or type.
    pub fn from_raw(raw: RawFilter, currency: Currency) -> Self {
        let categories = raw
            .categories
            .iter()
            .filter_map(|c| {
                let parsed = Category::from_str(c);
                if parsed.is_none() {
                    debug!(category = %c, "ignoring unknown category facet");
                }
                parsed
            })
            .collect();
        let types = raw
            .types
            .iter()
            .filter_map(|t| {
                let parsed = ProductType::from_str(t);
                if parsed.is_none() {
                    debug!(product_type = %t, "ignoring unknown type facet");
                }
                parsed
            })
            .collect();

        let price_ceiling = raw.price_range.map(|(low, high)| {
            if low != 0.0 {
                debug!(low, "price range lower bound is fixed at 0");
            }
            let high = if high.is_finite() { high.max(0.0) } else { 0.0 };
            Money::from_decimal(high, currency)
        });

        Self {
            categories,
            types,
            sizes: clean_set(raw.sizes),
            colors: clean_set(raw.colors),
            price_ceiling,
            sort: raw.sort_by.as_deref().map(SortKey::from_str).unwrap_or_default(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_type(mut self, product_type: ProductType) -> Self {
        self.types.insert(product_type);
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.sizes.insert(size.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.colors.insert(color.into());
        self
    }

    pub fn with_price_ceiling(mut self, ceiling: Money) -> Self {
        self.price_ceiling = Some(ceiling);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Keep the price ceiling within `[0, catalog max price]`.
    ///
    /// A ceiling in another currency than the catalog's cannot be compared
    /// and is dropped.
    pub fn clamped_to(mut self, catalog: &Catalog) -> Self {
        let max = catalog.max_price().amount_cents;
        self.price_ceiling = match self.price_ceiling {
            Some(ceiling) if ceiling.currency != catalog.currency() => {
                warn!(
                    ceiling = ceiling.currency.code(),
                    catalog = catalog.currency().code(),
                    "ignoring price ceiling in a foreign currency"
                );
                None
            }
            Some(ceiling) => Some(ceiling.clamp_amount(0, max)),
            None => None,
        };
        self
    }

    /// Whether any facet or price restriction is set.
    pub fn is_active(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// Number of selected facet values, counting a price ceiling as one.
    pub fn active_filter_count(&self) -> usize {
        self.categories.len()
            + self.types.len()
            + self.sizes.len()
            + self.colors.len()
            + usize::from(self.price_ceiling.is_some())
    }

    /// Reset facets and price, keeping the sort order.
    pub fn clear_filters(&mut self) {
        let sort = self.sort;
        *self = Self {
            sort,
            ..Self::default()
        };
    }

    /// Facet and price test (AND across facets, OR within a facet).
    pub fn matches(&self, product: &Product) -> bool {
        (self.categories.is_empty() || self.categories.contains(&product.category))
            && (self.types.is_empty() || self.types.contains(&product.product_type))
            && (self.sizes.is_empty() || product.sizes.iter().any(|s| self.sizes.contains(s)))
            && (self.colors.is_empty() || product.colors.iter().any(|c| self.colors.contains(c)))
            && self
                .price_ceiling
                .map_or(true, |ceiling| product.price <= ceiling)
    }
}

/// A filter as submitted by a form or query string, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFilter {
    pub categories: Vec<String>,
    pub types: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    /// `(low, high)` in major currency units.
    pub price_range: Option<(f64, f64)>,
    pub sort_by: Option<String>,
}

fn clean_set(values: Vec<String>) -> BTreeSet<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
