pub mod aggregator;
pub mod cache;
pub mod feeds;
pub mod fetcher;
pub mod normalizer;
pub mod types;
pub mod views;

pub use aggregator::FeedAggregator;
pub use cache::TtlCache;
pub use feeds::FeedBuilder;
pub use fetcher::{Fetcher, SortOrder};
pub use normalizer::PostNormalizer;
pub use types::*;
pub use views::{reader2_view, Reader2View};
