//! Read-only aggregations over the loaded post list
//!
//! Each function is a pure single pass over an already-loaded, already-sorted
//! post list. Nothing here re-reads the content store or mutates its input.

use indexmap::IndexMap;
use serde::Serialize;

use crate::content::Post;

/// How many tags "popular" covers
const POPULAR_TAG_COUNT: usize = 5;

/// How many related posts to suggest
const RELATED_POST_COUNT: usize = 3;

/// Corpus-wide tag statistics
#[derive(Debug, Clone, Serialize)]
pub struct BlogStats {
    pub total_posts: usize,
    /// Tag occurrence counts in first-encountered order
    pub tag_distribution: IndexMap<String, usize>,
    /// Top tags by count; ties keep first-encountered order
    pub popular_tags: Vec<String>,
}

/// Year -> month -> posts, months zero-padded two digits.
///
/// Leaf vectors inherit the global newest-first order because they are filled
/// from the already-sorted post list without re-sorting.
pub type Archive = IndexMap<String, IndexMap<String, Vec<Post>>>;

/// Count tag occurrences and rank the most used ones.
pub fn compute_stats(posts: &[Post]) -> BlogStats {
    let mut tag_distribution: IndexMap<String, usize> = IndexMap::new();
    for post in posts {
        for tag in &post.tags {
            *tag_distribution.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    // Stable sort over insertion order keeps first-seen tags ahead on ties
    let mut ranked: Vec<(&String, &usize)> = tag_distribution.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1));
    let popular_tags = ranked
        .into_iter()
        .take(POPULAR_TAG_COUNT)
        .map(|(tag, _)| tag.clone())
        .collect();

    BlogStats {
        total_posts: posts.len(),
        tag_distribution,
        popular_tags,
    }
}

/// Bucket posts by `(year, month)` split out of the normalized date.
///
/// Relies on dates being `YYYY-MM-DD`; a post whose date normalization fell
/// back to a raw string buckets under whatever its first two `-` segments
/// are. Accepted edge case, not defended against.
pub fn build_archive(posts: &[Post]) -> Archive {
    let mut archive = Archive::new();

    for post in posts {
        let mut parts = post.date.splitn(3, '-');
        let year = parts.next().unwrap_or("").to_string();
        let month = parts.next().unwrap_or("").to_string();

        archive
            .entry(year)
            .or_default()
            .entry(month)
            .or_default()
            .push(post.clone());
    }

    archive
}

/// Rank other posts by how many tags they share with the given tag set.
///
/// Excludes the current post, keeps only posts sharing at least one tag, and
/// caps the result at three. Equal scores keep the date-sorted order of the
/// input list (stable sort), which acts as the recency tie-break.
pub fn find_related(current_id: &str, tags: &[String], posts: &[Post]) -> Vec<Post> {
    if tags.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &Post)> = posts
        .iter()
        .filter(|post| post.id != current_id)
        .map(|post| {
            let shared = post.tags.iter().filter(|tag| tags.contains(tag)).count();
            (shared, post)
        })
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(RELATED_POST_COUNT)
        .map(|(_, post)| post.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, date: &str, tags: &[&str]) -> Post {
        Post {
            id: id.to_string(),
            title: id.to_uppercase(),
            date: date.to_string(),
            excerpt: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content_html: None,
        }
    }

    #[test]
    fn test_compute_stats_counts_and_ranks() {
        let posts = vec![
            post("p1", "2024-02-01", &["a"]),
            post("p2", "2024-01-15", &["a", "b"]),
        ];
        let stats = compute_stats(&posts);
        assert_eq!(stats.total_posts, 2);
        assert_eq!(stats.tag_distribution.get("a"), Some(&2));
        assert_eq!(stats.tag_distribution.get("b"), Some(&1));
        assert_eq!(stats.popular_tags, vec!["a", "b"]);
    }

    #[test]
    fn test_popular_tags_capped_at_five_ties_first_seen() {
        let posts = vec![
            post("p1", "2024-01-01", &["a", "b", "c", "d", "e", "f"]),
            post("p2", "2024-01-02", &["f"]),
        ];
        let stats = compute_stats(&posts);
        assert_eq!(stats.popular_tags.len(), 5);
        // f leads on count, then the remaining slots fill in first-seen order
        assert_eq!(stats.popular_tags, vec!["f", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_build_archive_buckets_by_year_month() {
        let posts = vec![
            post("p3", "2024-01-01", &[]),
            post("p2", "2023-11-20", &[]),
            post("p1", "2023-11-05", &[]),
        ];
        let archive = build_archive(&posts);
        assert_eq!(archive["2023"]["11"].len(), 2);
        assert_eq!(archive["2024"]["01"].len(), 1);
        // Leaves keep the input (newest-first) order
        assert_eq!(archive["2023"]["11"][0].id, "p2");
    }

    #[test]
    fn test_find_related_scores_and_caps() {
        let posts = vec![
            post("post1", "2024-05-01", &["x", "y"]),
            post("both", "2024-04-01", &["x", "y"]),
            post("one-x", "2024-03-01", &["x"]),
            post("one-y", "2024-02-01", &["y", "z"]),
            post("none", "2024-01-01", &["z"]),
            post("late-x", "2024-01-02", &["x"]),
        ];
        let tags = vec!["x".to_string(), "y".to_string()];
        let related = find_related("post1", &tags, &posts);

        let ids: Vec<_> = related.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], "both");
        // Single-tag matches keep the input order among themselves
        assert_eq!(ids[1], "one-x");
        assert_eq!(ids[2], "one-y");
        assert!(!ids.contains(&"post1"));
        assert!(!ids.contains(&"none"));
    }

    #[test]
    fn test_find_related_empty_tags_is_empty() {
        let posts = vec![post("other", "2024-01-01", &["x"])];
        assert!(find_related("post1", &[], &posts).is_empty());
    }
}
