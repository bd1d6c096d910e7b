mod pipeline;
mod query;

pub use pipeline::{filter_collections, CollectionFilter, ExtentPolicy, Filtered};
pub use query::Query;
