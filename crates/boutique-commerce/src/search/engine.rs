//! Catalog filtering and sorting.

use crate::catalog::Product;
use crate::search::{CategorySelector, FilterConfiguration};

/// Select and order the products to display.
///
/// Applies the navigation selector, then the facet and price filters, then a
/// stable sort. The result is always a subsequence of `catalog` (reordered
/// for non-`Newest` sorts); equal sort keys keep their catalog order.
pub fn filter_and_sort(
    catalog: &[Product],
    selector: &CategorySelector,
    config: &FilterConfiguration,
) -> Vec<Product> {
    filter_and_sort_refs(catalog, selector, config)
        .into_iter()
        .cloned()
        .collect()
}

/// Borrowing variant of [`filter_and_sort`].
pub fn filter_and_sort_refs<'a>(
    catalog: &'a [Product],
    selector: &CategorySelector,
    config: &FilterConfiguration,
) -> Vec<&'a Product> {
    let mut results: Vec<&Product> = catalog
        .iter()
        .filter(|p| selector.matches(p))
        .filter(|p| config.matches(p))
        .collect();
    config.sort.apply(&mut results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category, ProductType};
    use crate::money::{Currency, Money};
    use crate::search::SortKey;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn catalog() -> Catalog {
        Catalog::sample().unwrap()
    }

    #[test]
    fn test_femme_selector_keeps_catalog_order() {
        let catalog = catalog();
        let config = FilterConfiguration::new()
            .with_price_ceiling(Money::from_decimal(500.0, Currency::EUR));

        let results = filter_and_sort(
            catalog.products(),
            &CategorySelector::parse("femme"),
            &config,
        );
        assert_eq!(ids(&results), vec!["1", "2", "6"]);
    }

    #[test]
    fn test_all_selector_no_filters_is_identity() {
        let catalog = catalog();
        let results = filter_and_sort(
            catalog.products(),
            &CategorySelector::All,
            &FilterConfiguration::new(),
        );
        assert_eq!(results, catalog.products().to_vec());
    }

    #[test]
    fn test_accessories_and_sale_selectors() {
        let catalog = catalog();
        let config = FilterConfiguration::new();

        let accessories =
            filter_and_sort(catalog.products(), &CategorySelector::Accessories, &config);
        assert_eq!(ids(&accessories), vec!["4"]);

        let sale = filter_and_sort(catalog.products(), &CategorySelector::Sale, &config);
        assert_eq!(ids(&sale), vec!["2", "5"]);
    }

    #[test]
    fn test_facets_or_within_and_across() {
        let catalog = catalog();
        // (homme OR unisexe) AND size S
        let config = FilterConfiguration::new()
            .with_category(Category::Men)
            .with_category(Category::Unisex)
            .with_size("S");
        let results = filter_and_sort(catalog.products(), &CategorySelector::All, &config);
        assert_eq!(ids(&results), vec!["3", "5"]);

        // color Noir across categories, bottoms only
        let config = FilterConfiguration::new()
            .with_color("Noir")
            .with_type(ProductType::Bottoms);
        let results = filter_and_sort(catalog.products(), &CategorySelector::All, &config);
        assert_eq!(ids(&results), vec!["2", "6"]);
    }

    #[test]
    fn test_price_ceiling_is_inclusive() {
        let catalog = catalog();
        let config = FilterConfiguration::new().with_price_ceiling(Money::new(5900, Currency::EUR));
        let results = filter_and_sort(catalog.products(), &CategorySelector::All, &config);
        assert_eq!(ids(&results), vec!["1", "3", "4"]);

        let config = FilterConfiguration::new().with_price_ceiling(Money::zero(Currency::EUR));
        assert!(filter_and_sort(catalog.products(), &CategorySelector::All, &config).is_empty());
    }

    #[test]
    fn test_sort_by_price() {
        let catalog = catalog();
        let asc = FilterConfiguration::new().with_sort(SortKey::PriceAscending);
        let results = filter_and_sort(catalog.products(), &CategorySelector::All, &asc);
        assert_eq!(ids(&results), vec!["1", "4", "3", "6", "2", "5"]);

        let desc = FilterConfiguration::new().with_sort(SortKey::PriceDescending);
        let results = filter_and_sort(catalog.products(), &CategorySelector::All, &desc);
        assert_eq!(ids(&results), vec!["5", "2", "6", "3", "4", "1"]);
    }

    #[test]
    fn test_sort_by_rating() {
        let catalog = catalog();
        let config = FilterConfiguration::new().with_sort(SortKey::RatingDescending);
        let results = filter_and_sort(catalog.products(), &CategorySelector::All, &config);
        assert_eq!(ids(&results), vec!["4", "3", "6", "1", "5", "2"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let catalog = catalog();
        let mut products = catalog.products().to_vec();
        // Give everything the same price: order must be untouched.
        for p in &mut products {
            p.price = Money::new(1000, Currency::EUR);
        }
        let config = FilterConfiguration::new().with_sort(SortKey::PriceDescending);
        let results = filter_and_sort(&products, &CategorySelector::All, &config);
        assert_eq!(ids(&results), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_idempotent_and_subset() {
        let catalog = catalog();
        let config = FilterConfiguration::new()
            .with_size("M")
            .with_sort(SortKey::PriceAscending);

        let once = filter_and_sort(catalog.products(), &CategorySelector::All, &config);
        let twice = filter_and_sort(&once, &CategorySelector::All, &config);
        assert_eq!(once, twice);

        for product in &once {
            assert_eq!(catalog.products().iter().filter(|p| p.id == product.id).count(), 1);
        }
        let mut seen: Vec<_> = once.iter().map(|p| p.id.clone()).collect();
        seen.dedup();
        assert_eq!(seen.len(), once.len());
    }

    #[test]
    fn test_refs_variant_borrows() {
        let catalog = catalog();
        let refs = filter_and_sort_refs(
            catalog.products(),
            &CategorySelector::Category(Category::Men),
            &FilterConfiguration::new(),
        );
        assert_eq!(refs.len(), 2);
        assert!(std::ptr::eq(refs[0], &catalog.products()[2]));
    }
}
