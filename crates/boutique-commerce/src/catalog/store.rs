//! Immutable product catalog.

use crate::catalog::{Product, ProductRecord};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// The static list of purchasable products, in newest-first order.
///
/// Cloning is cheap: the products are shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
    currency: Currency,
}

impl Catalog {
    /// Build a catalog from products. Identifiers must be unique and every
    /// product must be priced in `currency`.
    pub fn new(products: Vec<Product>, currency: Currency) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CommerceError::InvalidProduct {
                    product_id: product.id.to_string(),
                    reason: "duplicate identifier".to_string(),
                });
            }
            if product.price.currency != currency {
                return Err(CommerceError::InvalidProduct {
                    product_id: product.id.to_string(),
                    reason: format!("priced in {}, catalog uses {}", product.price.currency, currency),
                });
            }
        }
        debug!(products = products.len(), %currency, "catalog loaded");
        Ok(Self {
            products: products.into(),
            currency,
        })
    }

    /// Parse a JSON array of catalog records.
    pub fn from_json(json: &str, currency: Currency) -> Result<Self, CommerceError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        let products = records
            .into_iter()
            .map(|record| Product::from_record(record, currency))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(products, currency)
    }

    /// The built-in demo catalog: six products, three of them `femme`.
    pub fn sample() -> Result<Self, CommerceError> {
        Self::from_json(SAMPLE_CATALOG, Currency::EUR)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Look up a product by identifier.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product, failing with `ProductNotFound`.
    pub fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Highest price in the catalog (zero when empty). Upper end of the
    /// price filter range.
    pub fn max_price(&self) -> Money {
        self.products
            .iter()
            .map(|p| p.price)
            .max_by_key(|m| m.amount_cents)
            .unwrap_or_else(|| Money::zero(self.currency))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const SAMPLE_CATALOG: &str = r#"[
  {
    "id": "1",
    "name": "T-shirt Essentiel Coton Bio",
    "price": 29.9,
    "images": ["/images/tshirt-essentiel-blanc.jpg", "/images/tshirt-essentiel-noir.jpg"],
    "category": "femme",
    "type": "hauts",
    "sizes": ["XS", "S", "M", "L"],
    "colors": ["Blanc", "Noir", "Beige"],
    "description": "Un t-shirt coupe droite, col rond, pour tous les jours.",
    "composition": "100% coton biologique",
    "care": "Lavage en machine à 30°C",
    "rating": 4.5,
    "reviewCount": 128,
    "isNew": true
  },
  {
    "id": "2",
    "name": "Jean Droit Taille Haute",
    "price": 79.0,
    "originalPrice": 99.0,
    "images": ["/images/jean-droit.jpg"],
    "category": "femme",
    "type": "bas",
    "sizes": ["34", "36", "38", "40", "42"],
    "colors": ["Bleu brut", "Noir"],
    "description": "Jean taille haute à jambe droite.",
    "composition": "98% coton, 2% élasthanne",
    "care": "Lavage à l'envers à 30°C",
    "rating": 4.2,
    "reviewCount": 86,
    "isOnSale": true
  },
  {
    "id": "3",
    "name": "Chemise Oxford",
    "price": 59.0,
    "images": ["/images/chemise-oxford.jpg"],
    "category": "homme",
    "type": "hauts",
    "sizes": ["S", "M", "L", "XL"],
    "colors": ["Blanc", "Bleu ciel"],
    "description": "Chemise en toile Oxford, col boutonné.",
    "composition": "100% coton",
    "care": "Lavage en machine à 40°C",
    "rating": 4.7,
    "reviewCount": 212,
    "isBestSeller": true
  },
  {
    "id": "4",
    "name": "Sac Cabas en Toile",
    "price": 45.0,
    "images": ["/images/cabas-toile.jpg"],
    "category": "unisexe",
    "type": "accessoires",
    "sizes": ["Unique"],
    "colors": ["Naturel", "Noir"],
    "description": "Grand cabas en toile épaisse avec poche intérieure.",
    "composition": "100% coton recyclé",
    "care": "Lavage à la main",
    "rating": 4.8,
    "reviewCount": 64,
    "isBestSeller": true
  },
  {
    "id": "5",
    "name": "Pull Col Rond Mérinos",
    "price": 89.0,
    "originalPrice": 119.0,
    "images": [],
    "category": "homme",
    "type": "hauts",
    "sizes": ["S", "M", "L", "XL"],
    "colors": ["Gris chiné", "Marine"],
    "description": "Pull fin en laine mérinos.",
    "composition": "100% laine mérinos",
    "care": "Lavage à la main, séchage à plat",
    "rating": 4.4,
    "reviewCount": 57,
    "isOnSale": true
  },
  {
    "id": "6",
    "name": "Jupe Plissée Midi",
    "price": 65.0,
    "images": ["/images/jupe-plissee.jpg"],
    "category": "femme",
    "type": "bas",
    "sizes": ["36", "38", "40"],
    "colors": ["Vert sauge", "Noir"],
    "description": "Jupe midi plissée à taille élastiquée.",
    "composition": "100% polyester recyclé",
    "care": "Lavage délicat à 30°C",
    "rating": 4.6,
    "reviewCount": 41,
    "isNew": true
  }
]"#;
