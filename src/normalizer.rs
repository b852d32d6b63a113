use crate::fetcher::Fetcher;
use crate::types::{AggregatorError, NormalizedPost, RawPost, Result};
use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::error;

pub const DEFAULT_TITLE: &str = "UNTITLED";
pub const DEFAULT_IMAGE: &str = "default.jpg";
pub const UNCATEGORIZED: &str = "UNCATEGORIZED";

const EXCERPT_MAX_CHARS: usize = 200;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Remove HTML tags, leaving text content untouched.
pub fn strip_tags(html: &str) -> String {
    TAG_PATTERN.replace_all(html, "").into_owned()
}

/// Format a post date as uppercased `"MON D, YYYY"`, e.g. `"JAN 5, 2024"`.
///
/// WordPress serves `date` as ISO-8601 without an offset; some installs include
/// one, so both forms parse.
pub fn format_display_date(raw: &str) -> Result<String> {
    let parsed = parse_post_date(raw)?;
    Ok(parsed.format("%b %-d, %Y").to_string().to_uppercase())
}

fn parse_post_date(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| AggregatorError::Parse(format!("invalid post date {raw:?}: {e}")))
}

/// Collect uppercased names of embedded terms whose taxonomy is `category`.
/// An empty result (including a missing `_embedded` block) becomes the
/// single-element `["UNCATEGORIZED"]`. Duplicates across term groups are kept.
pub fn extract_categories(post: &RawPost) -> Vec<String> {
    let names: Vec<String> = post
        .embedded
        .as_ref()
        .and_then(|embedded| embedded.terms.as_ref())
        .map(|groups| {
            groups
                .iter()
                .flatten()
                .filter(|term| term.taxonomy == "category")
                .map(|term| term.name.to_uppercase())
                .collect()
        })
        .unwrap_or_default();

    if names.is_empty() {
        vec![UNCATEGORIZED.to_string()]
    } else {
        names
    }
}

/// Converts one raw upstream post into the canonical reader shape.
pub struct PostNormalizer {
    fetcher: Arc<Fetcher>,
}

impl PostNormalizer {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    /// With `fetch_full`, the post is re-fetched by id with embedded taxonomy
    /// and media first, since list responses may omit full content. Any
    /// failure in here is wrapped as `Processing` tagged with the post id.
    pub async fn normalize(&self, raw: &RawPost, fetch_full: bool) -> Result<NormalizedPost> {
        let post_id = raw.id;
        self.normalize_inner(raw, fetch_full)
            .await
            .map_err(|source| {
                error!("failed to process post {}: {}", post_id, source);
                AggregatorError::Processing {
                    post_id,
                    source: Box::new(source),
                }
            })
    }

    async fn normalize_inner(&self, raw: &RawPost, fetch_full: bool) -> Result<NormalizedPost> {
        let fetched;
        let full = if fetch_full {
            fetched = self.fetcher.fetch_post(raw.id).await?;
            &fetched
        } else {
            raw
        };

        let title = {
            let stripped = full
                .title
                .as_ref()
                .map(|t| strip_tags(&t.rendered).to_uppercase())
                .unwrap_or_default();
            if stripped.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                stripped
            }
        };

        // The suffix is appended even when the excerpt was already short.
        let excerpt = {
            let stripped = full
                .excerpt
                .as_ref()
                .map(|e| strip_tags(&e.rendered))
                .unwrap_or_default();
            let mut truncated: String = stripped.chars().take(EXCERPT_MAX_CHARS).collect();
            truncated.push_str("...");
            truncated
        };

        let categories = extract_categories(full);

        let image = full
            .embedded
            .as_ref()
            .and_then(|embedded| embedded.featured_media.as_ref())
            .and_then(|media| media.first())
            .and_then(|media| media.source_url.clone())
            .unwrap_or_else(|| DEFAULT_IMAGE.to_string());

        let date = format_display_date(&full.date)?;

        Ok(NormalizedPost {
            id: full.id,
            title,
            content: full
                .content
                .as_ref()
                .map(|c| c.rendered.clone())
                .unwrap_or_default(),
            excerpt,
            image,
            categories,
            date,
            link: full.link.clone(),
        })
    }
}
