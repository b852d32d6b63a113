use reader_feeds::{reader2_view, FeedSet, NormalizedPost, ReaderFeed};
use serde_json::Value;

fn post(id: u64, categories: &[&str]) -> NormalizedPost {
    NormalizedPost {
        id,
        title: format!("POST {id}"),
        content: format!("<p>Body {id}</p>"),
        excerpt: format!("Summary {id}..."),
        image: "default.jpg".to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        date: "JAN 1, 2024".to_string(),
        link: format!("https://example.com/posts/{id}"),
    }
}

fn feed_set(posts: Vec<NormalizedPost>) -> FeedSet {
    FeedSet {
        reader1: ReaderFeed {
            posts: posts.clone(),
        },
        reader2: ReaderFeed { posts },
        reader3: ReaderFeed { posts: Vec::new() },
        cached_at: "2024-01-01T00:00:00+00:00".to_string(),
    }
}

#[test]
fn featured_is_the_third_newest_post() {
    let feeds = feed_set(vec![
        post(1, &["NEWS"]),
        post(2, &["NEWS"]),
        post(3, &["LIFE"]),
        post(4, &["NEWS"]),
    ]);

    let view = reader2_view(&feeds);
    assert_eq!(view.posts.len(), 4);
    assert_eq!(view.featured.as_ref().map(|p| p.id), Some(3));
}

#[test]
fn featured_is_absent_below_three_posts() {
    let feeds = feed_set(vec![post(1, &["NEWS"]), post(2, &["NEWS"])]);
    assert!(reader2_view(&feeds).featured.is_none());
}

#[test]
fn categories_deduplicate_by_name_with_first_wins_ids() {
    let feeds = feed_set(vec![post(1, &["NEWS"]), post(2, &["NEWS", "LIFE"])]);

    let view = reader2_view(&feeds);
    assert_eq!(view.categories.len(), 2);
    assert_eq!(
        view.categories.get("NEWS-0"),
        Some(&Value::String("NEWS".to_string()))
    );
    assert_eq!(
        view.categories.get("LIFE-1"),
        Some(&Value::String("LIFE".to_string()))
    );
}

#[test]
fn empty_category_names_fall_back_to_uncategorized() {
    let feeds = feed_set(vec![post(1, &[""])]);

    let view = reader2_view(&feeds);
    assert_eq!(
        view.categories.get("UNCATEGORIZED-0"),
        Some(&Value::String("UNCATEGORIZED".to_string()))
    );
}
