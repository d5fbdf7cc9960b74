//! Content loader - reads post documents from the posts directory
//!
//! Every call reads the directory fresh; nothing is cached between reads.
//! The load is fail-fast: one unreadable or malformed document aborts the
//! whole batch instead of producing a partial listing.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{excerpt_of, normalize_date, FrontMatter, MarkdownRenderer, Post};
use crate::error::{Error, Result};

/// Loads posts from the content store
pub struct ContentLoader {
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load every post as a lightweight record (no rendered body), sorted by
    /// date descending. Same-date posts order by id ascending so the result
    /// does not depend on directory listing order.
    pub fn load_all(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        for path in self.document_paths() {
            let (post, _body) = self.read_document(&path)?;
            posts.push(post);
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        tracing::debug!("loaded {} posts from {:?}", posts.len(), self.posts_dir);

        Ok(posts)
    }

    /// List every post id (filename minus extension), in directory order.
    pub fn list_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .document_paths()
            .into_iter()
            .filter_map(|path| id_of(&path))
            .collect())
    }

    /// Load one post by id with its body rendered to HTML.
    ///
    /// Fails with [`Error::PostNotFound`] when no document matches.
    pub fn render(&self, id: &str) -> Result<Post> {
        let path = self
            .resolve_id(id)
            .ok_or_else(|| Error::PostNotFound(id.to_string()))?;

        let (mut post, body) = self.read_document(&path)?;
        post.content_html = Some(self.renderer.render(&body));
        Ok(post)
    }

    /// Parse one document into a post record, returning the raw body too.
    fn read_document(&self, path: &Path) -> Result<(Post, String)> {
        let content = fs::read_to_string(path).map_err(|source| Error::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;

        let (fm, body) = FrontMatter::parse(&content).map_err(|source| Error::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?;

        let post = Post {
            id: id_of(path).unwrap_or_default(),
            title: fm.title.unwrap_or_default(),
            date: fm.date.as_deref().map(normalize_date).unwrap_or_default(),
            excerpt: excerpt_of(body),
            tags: fm.tags,
            content_html: None,
        };

        Ok((post, body.to_string()))
    }

    /// Markdown documents directly in the posts directory. Subdirectories
    /// are not scanned: an id always resolves flat, so listing and
    /// resolution agree on the store shape.
    fn document_paths(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && is_markdown_file(p))
            .collect()
    }

    /// Find the document for an id, trying each markdown extension
    fn resolve_id(&self, id: &str) -> Option<PathBuf> {
        ["md", "markdown"]
            .iter()
            .map(|ext| self.posts_dir.join(format!("{}.{}", id, ext)))
            .find(|candidate| candidate.is_file())
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Post id: the filename minus its extension
fn id_of(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_post(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "first.md",
            "---\ntitle: First\ndate: 2024-01-01\ntags: rust\n---\nOldest Post Here\n",
        );
        write_post(
            dir.path(),
            "second.md",
            "---\ntitle: Second\ndate: 2024-02-01\ntags: rust, go\n---\nNewest post\n",
        );
        write_post(
            dir.path(),
            "third.md",
            "---\ntitle: Third\ndate: 2024-01-15\n---\nMiddle post\n",
        );
        dir
    }

    #[test]
    fn test_load_all_sorts_by_date_descending() {
        let dir = corpus();
        let posts = ContentLoader::new(dir.path()).load_all().unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["second", "third", "first"]);
    }

    #[test]
    fn test_same_date_ties_break_by_id() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "zebra.md", "---\ndate: 2024-01-01\n---\nz\n");
        write_post(dir.path(), "aardvark.md", "---\ndate: 2024-01-01\n---\na\n");
        let posts = ContentLoader::new(dir.path()).load_all().unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["aardvark", "zebra"]);
    }

    #[test]
    fn test_record_fields_are_normalized() {
        let dir = corpus();
        let posts = ContentLoader::new(dir.path()).load_all().unwrap();
        let first = posts.iter().find(|p| p.id == "first").unwrap();
        assert_eq!(first.title, "First");
        assert_eq!(first.date, "2024-01-01");
        assert_eq!(first.excerpt, "oldest post here");
        assert_eq!(first.tags, vec!["rust"]);
        assert!(first.content_html.is_none());
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "bare.md", "Just a body\n");
        let posts = ContentLoader::new(dir.path()).load_all().unwrap();
        assert_eq!(posts[0].title, "");
        assert_eq!(posts[0].date, "");
        assert!(posts[0].tags.is_empty());
    }

    #[test]
    fn test_malformed_date_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "odd.md", "---\ndate: not-a-date\n---\nBody\n");
        let posts = ContentLoader::new(dir.path()).load_all().unwrap();
        assert_eq!(posts[0].date, "not-a-date");
    }

    #[test]
    fn test_malformed_document_aborts_load() {
        let dir = corpus();
        write_post(dir.path(), "broken.md", "---\ntitle: [oops\n---\nBody\n");
        let result = ContentLoader::new(dir.path()).load_all();
        assert!(matches!(result, Err(Error::Frontmatter { .. })));
    }

    #[test]
    fn test_list_ids_round_trips_filenames() {
        let dir = corpus();
        let mut ids = ContentLoader::new(dir.path()).list_ids().unwrap();
        ids.sort();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_render_populates_content_html() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "hello.md",
            "---\ntitle: Hello\ndate: 2024-01-01\n---\n# Heading\n\nBody text.\n",
        );
        let post = ContentLoader::new(dir.path()).render("hello").unwrap();
        let html = post.content_html.unwrap();
        assert!(html.contains("<h1>Heading</h1>"));
        assert_eq!(post.excerpt, "# heading");
    }

    #[test]
    fn test_nested_directories_are_ignored() {
        let dir = corpus();
        let nested = dir.path().join("2024");
        fs::create_dir(&nested).unwrap();
        write_post(
            &nested,
            "nested.md",
            "---\ntitle: Nested\ndate: 2024-03-01\n---\nBody\n",
        );

        let loader = ContentLoader::new(dir.path());
        let posts = loader.load_all().unwrap();
        assert!(posts.iter().all(|p| p.id != "nested"));
        assert!(matches!(
            loader.render("nested"),
            Err(Error::PostNotFound(id)) if id == "nested"
        ));
    }

    #[test]
    fn test_render_unknown_id_is_not_found() {
        let dir = corpus();
        let result = ContentLoader::new(dir.path()).render("missing");
        assert!(matches!(result, Err(Error::PostNotFound(id)) if id == "missing"));
    }
}
