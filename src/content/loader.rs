//! Content loader - loads posts and author records from the source directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{Author, FrontMatter, MarkdownRenderer, Post, AUTHOR_SLUG_PREFIX};
use crate::helpers::{full_url_for, url_for};
use crate::Gazette;

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    gazette: &'a Gazette,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(gazette: &'a Gazette) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &gazette.config.highlight.theme,
            gazette.config.highlight.line_number,
        );
        Self { gazette, renderer }
    }

    /// Load all posts from source/_posts
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.gazette.source_dir.join("_posts");
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path, &posts_dir) {
                    Ok(post) => {
                        if post.published || self.gazette.config.render_drafts {
                            posts.push(post);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        // Newest first; undated posts sink to the end
        posts.sort_by(|a, b| match (&b.date, &a.date) {
            (Some(bd), Some(ad)) => bd.cmp(ad).then_with(|| a.title.cmp(&b.title)),
            (Some(_), None) => std::cmp::Ordering::Greater,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (None, None) => a.title.cmp(&b.title),
        });

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path, posts_dir: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        // Get title from front-matter or filename
        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        // Source path relative to the source dir
        let source = path
            .strip_prefix(&self.gazette.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        // Slug derives from the file path under _posts; nested directories
        // produce multi-segment slugs ("2023/my-post")
        let slug = slug_from_path(path, posts_dir);

        let url_path = url_for(&self.gazette.config, &format!("{}/", slug));
        let permalink = full_url_for(&self.gazette.config, &format!("{}/", slug));

        let content_html = self.renderer.render(body)?;

        let mut post = Post::new(title, slug, source);
        post.date = fm.parse_date();
        post.updated = fm.parse_updated();
        post.description = fm.description;
        post.image = fm.image;
        post.authors = fm.authors;
        post.raw = body.to_string();
        post.content = content_html;
        post.full_source = path.to_path_buf();
        post.path = url_path;
        post.permalink = permalink;
        post.published = fm.published;
        post.extra = fm.extra;

        Ok(post)
    }

    /// Load all author records from source/_authors
    pub fn load_authors(&self) -> Result<Vec<Author>> {
        let authors_dir = self.gazette.source_dir.join("_authors");
        if !authors_dir.exists() {
            return Ok(Vec::new());
        }

        let mut authors = Vec::new();

        for entry in WalkDir::new(&authors_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_author(path) {
                    Ok(author) => authors.push(author),
                    Err(e) => {
                        tracing::warn!("Failed to load author {:?}: {}", path, e);
                    }
                }
            }
        }

        authors.sort_by(|a, b| a.slug.cmp(&b.slug));

        Ok(authors)
    }

    /// Load a single author record from a file
    fn load_author(&self, path: &Path) -> Result<Author> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let slug = format!("{}{}", AUTHOR_SLUG_PREFIX, stem);
        let name = fm.title.clone().unwrap_or_else(|| stem.clone());

        let source = path
            .strip_prefix(&self.gazette.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let mut author = Author::new(slug, name, source);
        author.avatar = fm.avatar.unwrap_or_default();
        author.handle = fm.handle.unwrap_or_default();
        author.content = self.renderer.render(body)?;

        Ok(author)
    }
}

/// Build a slug from a markdown file path relative to a base directory
fn slug_from_path(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    let without_ext = rel.with_extension("");

    without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site_with_content(dir: &Path) -> Gazette {
        fs::create_dir_all(dir.join("source/_posts/2023")).unwrap();
        fs::create_dir_all(dir.join("source/_authors")).unwrap();

        fs::write(
            dir.join("source/_posts/hello.md"),
            "---\ntitle: Hello\ndate: 2023-05-30\nauthors: jane-doe\n---\n\nHi there.\n",
        )
        .unwrap();
        fs::write(
            dir.join("source/_posts/2023/nested.md"),
            "---\ntitle: Nested\ndate: 2023-06-01\n---\n\nNested body.\n",
        )
        .unwrap();
        fs::write(
            dir.join("source/_posts/undated.md"),
            "---\ntitle: Undated\n---\n\nNo date here.\n",
        )
        .unwrap();
        fs::write(
            dir.join("source/_authors/jane-doe.md"),
            "---\ntitle: Jane Doe\navatar: /images/jane.png\nhandle: janedoe\n---\n\nJane writes.\n",
        )
        .unwrap();

        Gazette::new(dir).unwrap()
    }

    #[test]
    fn test_load_posts_slugs_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let gazette = site_with_content(dir.path());

        let loader = ContentLoader::new(&gazette);
        let posts = loader.load_posts().unwrap();

        assert_eq!(posts.len(), 3);
        // Newest first, undated last
        assert_eq!(posts[0].slug, "2023/nested");
        assert_eq!(posts[1].slug, "hello");
        assert_eq!(posts[2].slug, "undated");
        assert!(posts[2].date.is_none());

        assert_eq!(posts[1].path, "/hello/");
        assert_eq!(posts[1].authors, vec!["jane-doe"]);
        assert!(posts[1].content.contains("Hi there."));
    }

    #[test]
    fn test_load_authors() {
        let dir = tempfile::tempdir().unwrap();
        let gazette = site_with_content(dir.path());

        let loader = ContentLoader::new(&gazette);
        let authors = loader.load_authors().unwrap();

        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].slug, "authors/jane-doe");
        assert_eq!(authors[0].name, "Jane Doe");
        assert_eq!(authors[0].handle, "janedoe");
        assert!(authors[0].content.contains("Jane writes."));
    }

    #[test]
    fn test_slug_from_path() {
        let base = Path::new("/site/source/_posts");
        assert_eq!(
            slug_from_path(Path::new("/site/source/_posts/2023/my-post.md"), base),
            "2023/my-post"
        );
        assert_eq!(
            slug_from_path(Path::new("/site/source/_posts/hello.markdown"), base),
            "hello"
        );
    }
}
