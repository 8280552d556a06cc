//! Product catalog module.
//!
//! Contains the product model and the immutable catalog store.

mod product;
mod store;

pub use product::{Category, Product, ProductRecord, ProductType, PLACEHOLDER_IMAGE};
pub use store::Catalog;
