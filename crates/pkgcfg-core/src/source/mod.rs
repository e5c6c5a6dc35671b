pub mod model;
pub mod provider;

pub use model::{
    AGGREGATE_SOURCE_LOCATION, AGGREGATE_SOURCE_NAME, DEFAULT_SOURCE_LOCATION,
    DEFAULT_SOURCE_NAME, PackageSource, collapse_aggregates,
};
pub use provider::PackageSourceProvider;
