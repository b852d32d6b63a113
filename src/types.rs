use serde::{Deserialize, Serialize};

/// A post as the upstream WordPress REST API returns it. Only lives for the
/// duration of one aggregation cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPost {
    pub id: u64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Rendered>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<Rendered>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Rendered>,
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Embedded>,
}

/// WordPress wraps every HTML-bearing field in a `{ "rendered": ... }` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// The `_embedded` payload requested via `?_embed`: taxonomy term groups and
/// featured media descriptors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedded {
    #[serde(rename = "wp:term", default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<Vec<TermRef>>>,
    #[serde(
        rename = "wp:featuredmedia",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub featured_media: Option<Vec<MediaRef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermRef {
    #[serde(default)]
    pub taxonomy: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Canonical post shape served to readers.
///
/// Invariants: `title` is uppercase and tag-free, `categories` is never empty,
/// and `excerpt` always carries the `"..."` suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPost {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub image: String,
    pub categories: Vec<String>,
    pub date: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderFeed {
    pub posts: Vec<NormalizedPost>,
}

/// The three reader feeds plus the build timestamp. `reader1` and `reader2`
/// share the same headline slice and are content-equal by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedSet {
    pub reader1: ReaderFeed,
    pub reader2: ReaderFeed,
    pub reader3: ReaderFeed,
    pub cached_at: String,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub cache_ttl_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dirtmercy.com/est/wp-json/wp/v2".to_string(),
            user_agent: "reader-feeds/1.0".to_string(),
            timeout_seconds: 15,
            cache_ttl_seconds: 300,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("upstream request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("upstream returned HTTP {status}")]
    Http { status: u16 },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to parse upstream response: {0}")]
    Parse(String),

    #[error("failed to process post {post_id}: {source}")]
    Processing {
        post_id: u64,
        #[source]
        source: Box<AggregatorError>,
    },
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
