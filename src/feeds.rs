use crate::fetcher::Fetcher;
use crate::normalizer::PostNormalizer;
use crate::types::{FeedSet, NormalizedPost, RawPost, ReaderFeed, Result};
use chrono::Utc;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::debug;

/// How many of the newest posts make up the reader1/reader2 headline slice.
pub const HEADLINE_COUNT: usize = 10;

/// Partitions raw post lists into the three reader feeds.
pub struct FeedBuilder {
    normalizer: PostNormalizer,
}

impl FeedBuilder {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self {
            normalizer: PostNormalizer::new(fetcher),
        }
    }

    /// Build the full feed set from the newest-first and oldest-first lists.
    ///
    /// reader1 and reader2 consume the same headline slice, so the batch is
    /// computed once and exposed under both names; the output keeps two
    /// separate `posts` lists in case the feeds diverge later. A single
    /// failing enrichment fails the whole build.
    pub async fn build(&self, latest_desc: &[RawPost], oldest_asc: &[RawPost]) -> Result<FeedSet> {
        debug!(
            "building feeds from {} headline and {} archive posts",
            latest_desc.len().min(HEADLINE_COUNT),
            oldest_asc.len()
        );

        let headline_batch = self
            .normalize_batch(latest_desc.iter().take(HEADLINE_COUNT))
            .await?;
        let archive_batch = self.normalize_batch(oldest_asc).await?;

        Ok(FeedSet {
            reader1: ReaderFeed {
                posts: headline_batch.clone(),
            },
            reader2: ReaderFeed {
                posts: headline_batch,
            },
            reader3: ReaderFeed {
                posts: archive_batch,
            },
            cached_at: Utc::now().to_rfc3339(),
        })
    }

    /// Fan out one enrichment call per post, joined all-or-nothing.
    async fn normalize_batch<'a, I>(&self, posts: I) -> Result<Vec<NormalizedPost>>
    where
        I: IntoIterator<Item = &'a RawPost>,
    {
        try_join_all(
            posts
                .into_iter()
                .map(|post| self.normalizer.normalize(post, true)),
        )
        .await
    }
}
