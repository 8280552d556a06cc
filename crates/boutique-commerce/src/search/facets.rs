//! Facet values for the filter sidebar.

use crate::catalog::Product;
use crate::money::Money;
use crate::search::FilterConfiguration;
use serde::{Deserialize, Serialize};

/// A single facet value with count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: String,
    pub count: u32,
    pub selected: bool,
}

/// Facet options available in a product list, each in first-seen order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FacetSummary {
    pub categories: Vec<FacetValue>,
    pub types: Vec<FacetValue>,
    pub sizes: Vec<FacetValue>,
    pub colors: Vec<FacetValue>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
}

impl FacetSummary {
    /// Count facet values across `products`, marking those selected in
    /// `config`.
    pub fn from_products(products: &[Product], config: &FilterConfiguration) -> Self {
        let mut summary = Self::default();

        for product in products {
            tally(
                &mut summary.categories,
                product.category.as_str(),
                config.categories.contains(&product.category),
            );
            tally(
                &mut summary.types,
                product.product_type.as_str(),
                config.types.contains(&product.product_type),
            );
            for size in &product.sizes {
                tally(&mut summary.sizes, size, config.sizes.contains(size));
            }
            for color in &product.colors {
                tally(&mut summary.colors, color, config.colors.contains(color));
            }
        }

        summary.min_price = products
            .iter()
            .map(|p| p.price)
            .min_by_key(|m| m.amount_cents);
        summary.max_price = products
            .iter()
            .map(|p| p.price)
            .max_by_key(|m| m.amount_cents);
        summary
    }
}

fn tally(values: &mut Vec<FacetValue>, value: &str, selected: bool) {
    match values.iter_mut().find(|v| v.value == value) {
        Some(existing) => existing.count += 1,
        None => values.push(FacetValue {
            value: value.to_string(),
            count: 1,
            selected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_summary_counts() {
        let catalog = Catalog::sample().unwrap();
        let config = FilterConfiguration::new().with_color("Noir");
        let summary = FacetSummary::from_products(catalog.products(), &config);

        let femme = summary.categories.iter().find(|v| v.value == "femme").unwrap();
        assert_eq!(femme.count, 3);
        assert!(!femme.selected);

        let noir = summary.colors.iter().find(|v| v.value == "Noir").unwrap();
        assert_eq!(noir.count, 4);
        assert!(noir.selected);

        // First-seen order from product "1".
        let first_sizes: Vec<_> = summary.sizes.iter().take(4).map(|v| v.value.as_str()).collect();
        assert_eq!(first_sizes, vec!["XS", "S", "M", "L"]);

        assert_eq!(summary.min_price.unwrap().amount_cents, 2990);
        assert_eq!(summary.max_price.unwrap().amount_cents, 8900);
    }

    #[test]
    fn test_summary_empty() {
        let summary = FacetSummary::from_products(&[], &FilterConfiguration::new());
        assert!(summary.sizes.is_empty());
        assert!(summary.min_price.is_none());
    }
}
