use crate::cache::TtlCache;
use crate::feeds::FeedBuilder;
use crate::fetcher::{Fetcher, SortOrder};
use crate::types::{FeedSet, FetchConfig, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const CACHE_KEY: &str = "posts";

/// Page sizes of the two upstream list fetches. Pagination beyond these fixed
/// sizes is out of scope.
pub const LATEST_PAGE_SIZE: usize = 22;
pub const ARCHIVE_PAGE_SIZE: usize = 12;

/// The one entry point the routing layer calls. Owns the fetcher, the feed
/// builder and the TTL cache; construct once per process and share by
/// reference.
pub struct FeedAggregator {
    fetcher: Arc<Fetcher>,
    builder: FeedBuilder,
    cache: TtlCache<FeedSet>,
}

impl FeedAggregator {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let cache = TtlCache::new(Duration::from_secs(config.cache_ttl_seconds));
        let fetcher = Arc::new(Fetcher::new(config)?);
        let builder = FeedBuilder::new(fetcher.clone());

        Ok(Self {
            fetcher,
            builder,
            cache,
        })
    }

    /// Serve the aggregated feed set, rebuilding from upstream on a cache
    /// miss. Any upstream or build failure aborts the call and leaves the
    /// cache at its prior state.
    pub async fn get_all_feeds(&self) -> Result<FeedSet> {
        if let Some(feeds) = self.cache.get(CACHE_KEY).await {
            debug!("serving feeds from cache");
            return Ok(feeds);
        }

        info!("cache miss, rebuilding feeds from upstream");
        let (latest, oldest) = tokio::try_join!(
            self.fetcher
                .fetch_posts(LATEST_PAGE_SIZE, SortOrder::Descending),
            self.fetcher
                .fetch_posts(ARCHIVE_PAGE_SIZE, SortOrder::Ascending),
        )?;

        let feeds = self.builder.build(&latest, &oldest).await?;
        self.cache.set(CACHE_KEY, feeds.clone()).await;

        info!(
            "rebuilt feeds: reader1={} reader2={} reader3={} posts",
            feeds.reader1.posts.len(),
            feeds.reader2.posts.len(),
            feeds.reader3.posts.len()
        );
        Ok(feeds)
    }
}
