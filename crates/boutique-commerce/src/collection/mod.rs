//! Persisted collections.
//!
//! The generic manager behind the cart and the wishlist.

mod manager;

pub use manager::{AddOutcome, CollectionEntry, CollectionManager};
