//! Search module.
//!
//! Contains the filter configuration, the filter/sort engine and facet
//! summaries.

mod engine;
mod facets;
mod query;

pub use engine::{filter_and_sort, filter_and_sort_refs};
pub use facets::{FacetSummary, FacetValue};
pub use query::{CategorySelector, FilterConfiguration, RawFilter, SortKey};
