//! List view state: search, tag filter, sort order, pagination
//!
//! A pure reducer over the full post list. Every state change recomputes the
//! whole filter -> sort -> page-slice pipeline from scratch; the source list
//! is never mutated. No incremental updates, which is fine at personal-blog
//! scale.

use serde::Deserialize;

use crate::content::Post;

/// Allowed page sizes
pub const PER_PAGE_CHOICES: [usize; 3] = [5, 10, 20];

/// Default page size
pub const DEFAULT_PER_PAGE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortOrder {
    /// Date descending
    #[default]
    #[serde(rename = "desc", alias = "newest")]
    Newest,
    /// Date ascending
    #[serde(rename = "asc", alias = "oldest")]
    Oldest,
}

impl SortOrder {
    pub fn as_query(self) -> &'static str {
        match self {
            SortOrder::Newest => "desc",
            SortOrder::Oldest => "asc",
        }
    }
}

/// Interactive list state
#[derive(Debug, Clone)]
pub struct ListState {
    pub search: String,
    pub sort: SortOrder,
    /// Selected tags, AND semantics: a post must carry every one
    pub selected_tags: Vec<String>,
    pub page: usize,
    pub per_page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortOrder::Newest,
            selected_tags: Vec::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One derived page of the filtered, sorted list
#[derive(Debug, Clone)]
pub struct ListPage {
    pub posts: Vec<Post>,
    /// How many posts passed the filter, across all pages
    pub total_matched: usize,
    pub total_pages: usize,
    /// The page actually served, after clamping
    pub page: usize,
    pub per_page: usize,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    /// Select or deselect a tag
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change the page size and reset to page 1. Values outside
    /// [`PER_PAGE_CHOICES`] are ignored.
    pub fn set_per_page(&mut self, per_page: usize) {
        if PER_PAGE_CHOICES.contains(&per_page) {
            self.per_page = per_page;
            self.page = 1;
        }
    }

    /// Derive the current page from the full post list.
    ///
    /// A requested page outside the valid range clamps to the nearest valid
    /// page, so shrinking the result set with a filter never strands the
    /// view on an empty page.
    pub fn select(&self, posts: &[Post]) -> ListPage {
        let mut matched: Vec<Post> = posts
            .iter()
            .filter(|post| self.matches(post))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::Newest => matched.sort_by(|a, b| b.date.cmp(&a.date)),
            SortOrder::Oldest => matched.sort_by(|a, b| a.date.cmp(&b.date)),
        }

        let total_matched = matched.len();
        let total_pages = total_matched.div_ceil(self.per_page);
        let page = self.page.clamp(1, total_pages.max(1));

        let start = (page - 1) * self.per_page;
        let posts = matched
            .into_iter()
            .skip(start)
            .take(self.per_page)
            .collect();

        ListPage {
            posts,
            total_matched,
            total_pages,
            page,
            per_page: self.per_page,
        }
    }

    /// Filter predicate: case-insensitive substring over title, excerpt, or
    /// any tag, AND the post's tags must cover every selected tag.
    fn matches(&self, post: &Post) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty()
            || post.title.to_lowercase().contains(&search)
            || post.excerpt.to_lowercase().contains(&search)
            || post.tags.iter().any(|tag| tag.to_lowercase().contains(&search));

        let matches_tags = self
            .selected_tags
            .iter()
            .all(|selected| post.tags.iter().any(|tag| tag == selected));

        matches_search && matches_tags
    }
}
