use clap::Parser;
use reader_feeds::{FeedAggregator, FetchConfig};
use tracing::info;

#[derive(Parser)]
#[command(about = "Aggregate upstream posts into the three reader feeds")]
struct Cli {
    /// Base URL of the upstream content API
    #[arg(long)]
    base_url: Option<String>,

    /// Upstream request deadline in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Cache TTL in seconds
    #[arg(long)]
    ttl: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = FetchConfig::default();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_seconds = timeout;
    }
    if let Some(ttl) = cli.ttl {
        config.cache_ttl_seconds = ttl;
    }

    info!("aggregating feeds from {}", config.base_url);
    let aggregator = FeedAggregator::new(config)?;
    let feeds = aggregator.get_all_feeds().await?;

    info!(
        "built feeds at {}: reader1={} reader2={} reader3={} posts",
        feeds.cached_at,
        feeds.reader1.posts.len(),
        feeds.reader2.posts.len(),
        feeds.reader3.posts.len()
    );
    println!("{}", serde_json::to_string_pretty(&feeds)?);

    Ok(())
}
