//! Shopping cart module.

mod cart;

pub use cart::{Cart, CartItem, CartKey, VariantSelection, MAX_QUANTITY_PER_ITEM};
