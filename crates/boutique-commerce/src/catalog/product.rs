//! Product types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Image shown when a product has no images.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

/// Audience a product is cut for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "homme", alias = "men")]
    Men,
    #[serde(rename = "femme", alias = "women")]
    Women,
    #[serde(rename = "unisexe", alias = "unisex")]
    Unisex,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Men, Category::Women, Category::Unisex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Men => "homme",
            Category::Women => "femme",
            Category::Unisex => "unisexe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "homme" | "men" => Some(Category::Men),
            "femme" | "women" => Some(Category::Women),
            "unisexe" | "unisex" => Some(Category::Unisex),
            _ => None,
        }
    }
}

/// Garment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "hauts", alias = "tops")]
    Tops,
    #[serde(rename = "bas", alias = "bottoms")]
    Bottoms,
    #[serde(rename = "accessoires", alias = "accessories")]
    Accessories,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Tops,
        ProductType::Bottoms,
        ProductType::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Tops => "hauts",
            ProductType::Bottoms => "bas",
            ProductType::Accessories => "accessoires",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hauts" | "tops" => Some(ProductType::Tops),
            "bas" | "bottoms" => Some(ProductType::Bottoms),
            "accessoires" | "accessories" => Some(ProductType::Accessories),
            _ => None,
        }
    }
}

/// A product in the catalog.
///
/// Products are built once when the catalog loads and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Selling price.
    pub price: Money,
    /// Price before markdown, for strike-through display.
    pub original_price: Option<Money>,
    /// Image references, first one is the primary image.
    pub images: Vec<String>,
    pub category: Category,
    pub product_type: ProductType,
    /// Available sizes, in display order.
    pub sizes: Vec<String>,
    /// Available colors, in display order.
    pub colors: Vec<String>,
    pub description: String,
    pub composition: String,
    pub care: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    pub review_count: u32,
    pub is_new: bool,
    pub is_on_sale: bool,
    pub is_best_seller: bool,
}

impl Product {
    /// Build a product from a catalog record, validating its invariants.
    pub fn from_record(record: ProductRecord, currency: Currency) -> Result<Self, CommerceError> {
        let invalid = |reason: &str| CommerceError::InvalidProduct {
            product_id: record.id.clone(),
            reason: reason.to_string(),
        };

        if record.id.trim().is_empty() {
            return Err(invalid("empty identifier"));
        }
        let price = Money::try_from_decimal(record.price, currency)
            .filter(|p| !p.is_negative())
            .ok_or_else(|| invalid("price must be a non-negative amount within range"))?;
        let original_price = match record.original_price {
            Some(original) => Some(
                Money::try_from_decimal(original, currency)
                    .filter(|o| o.amount_cents >= price.amount_cents)
                    .ok_or_else(|| invalid("original price must be at least the price"))?,
            ),
            None => None,
        };
        if record.sizes.is_empty() {
            return Err(invalid("at least one size is required"));
        }
        if record.colors.is_empty() {
            return Err(invalid("at least one color is required"));
        }
        if !(0.0..=5.0).contains(&record.rating) {
            return Err(invalid("rating must be between 0 and 5"));
        }

        Ok(Self {
            id: ProductId::new(record.id),
            name: record.name,
            price,
            original_price,
            images: record.images,
            category: record.category,
            product_type: record.product_type,
            sizes: record.sizes,
            colors: record.colors,
            description: record.description,
            composition: record.composition,
            care: record.care,
            rating: record.rating,
            review_count: record.review_count,
            is_new: record.is_new,
            is_on_sale: record.is_on_sale,
            is_best_seller: record.is_best_seller,
        })
    }

    /// Primary image, or the placeholder when the product has none.
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Percentage saved against the original price, rounded to the nearest
    /// whole percent.
    pub fn discount_percentage(&self) -> Option<u32> {
        let original = self.original_price?;
        if original.amount_cents <= self.price.amount_cents || original.amount_cents == 0 {
            return None;
        }
        let savings = original.amount_cents - self.price.amount_cents;
        Some(((savings as f64 / original.amount_cents as f64) * 100.0).round() as u32)
    }
}

/// A product as it appears in a catalog feed (decimal prices, flat fields).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: Category,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub composition: String,
    #[serde(default)]
    pub care: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_on_sale: bool,
    #[serde(default)]
    pub is_best_seller: bool,
}
