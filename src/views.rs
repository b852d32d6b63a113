use crate::normalizer::UNCATEGORIZED;
use crate::types::{FeedSet, NormalizedPost};
use serde::Serialize;
use serde_json::{Map, Value};

/// The reader2 presentation shape: the feed's posts plus a featured pick and
/// the unique categories gathered across them. Pure derivation over an
/// already-built feed set; never touches the network or the cache.
#[derive(Debug, Clone, Serialize)]
pub struct Reader2View {
    pub posts: Vec<NormalizedPost>,
    pub featured: Option<NormalizedPost>,
    pub categories: Map<String, Value>,
}

/// Derive the reader2 view. The featured post is the 3rd newest when at least
/// three exist. Category keys are synthetic ids of the form `"{NAME}-{index}"`
/// where index is the category's position within its post; the first
/// occurrence of a name wins.
pub fn reader2_view(feeds: &FeedSet) -> Reader2View {
    let posts = feeds.reader2.posts.clone();
    let featured = (posts.len() >= 3).then(|| posts[2].clone());

    let mut categories = Map::new();
    for post in &posts {
        for (index, name) in post.categories.iter().enumerate() {
            let clean = if name.is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                name.to_uppercase()
            };
            let already_listed = categories
                .values()
                .any(|listed| listed.as_str() == Some(clean.as_str()));
            if !already_listed {
                categories.insert(format!("{clean}-{index}"), Value::String(clean));
            }
        }
    }

    Reader2View {
        posts,
        featured,
        categories,
    }
}
