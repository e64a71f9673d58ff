//! Generator module - composes pages and writes the static site
//!
//! Composition for a single route runs resolve -> link authors -> render;
//! an unresolved route is a terminal not-found outcome, never a partial
//! page.

use anyhow::Result;
use std::fs;
use walkdir::WalkDir;

use crate::content::ContentStore;
use crate::helpers::{date_attr, encode_href, format_date};
use crate::templates::{
    base_context, BylineAuthor, IndexEntry, PostPage, TemplateRenderer, NAV_SCRIPT, STYLESHEET,
};
use crate::Gazette;

/// Outcome of composing the page for a requested path
pub enum ComposeOutcome {
    /// The page rendered completely
    Rendered(String),
    /// No record matched the requested path
    NotFound,
}

/// Static site generator using the embedded blog theme
pub struct Generator {
    gazette: Gazette,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(gazette: &Gazette) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            gazette: gazette.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, store: &ContentStore) -> Result<()> {
        fs::create_dir_all(&self.gazette.public_dir)?;

        self.write_theme_assets()?;
        self.copy_source_assets()?;

        self.generate_post_pages(store)?;
        self.generate_index_page(store)?;
        self.generate_not_found_page()?;

        Ok(())
    }

    /// Compose the page for the given path segments
    ///
    /// Segments join into a candidate slug; a miss yields
    /// `ComposeOutcome::NotFound` rather than a partial page.
    pub fn compose_post<S: AsRef<str>>(
        &self,
        store: &ContentStore,
        segments: &[S],
    ) -> Result<ComposeOutcome> {
        let post = match store.resolve(segments) {
            Some(post) => post,
            None => return Ok(ComposeOutcome::NotFound),
        };

        // Dangling author references are omissions, not errors
        let authors: Vec<BylineAuthor> = store
            .link_authors(&post.authors)
            .into_iter()
            .flatten()
            .map(BylineAuthor::from)
            .collect();

        let page = PostPage {
            title: post.title.clone(),
            date: post
                .date
                .as_ref()
                .map(|d| format_date(d, &self.gazette.config.date_format)),
            datetime: post.date.as_ref().map(date_attr),
            image: post.image.clone(),
            authors,
            content: post.content.clone(),
        };

        let segment = segments.first().map(|s| s.as_ref().to_string());
        let mut context = base_context(&self.gazette.config, segment.as_deref());
        context.insert("post", &page);

        let html = self.renderer.render("post.html", &context)?;
        Ok(ComposeOutcome::Rendered(html))
    }

    /// Generate a page for every known route
    fn generate_post_pages(&self, store: &ContentStore) -> Result<()> {
        for segments in store.static_paths() {
            let html = match self.compose_post(store, &segments)? {
                ComposeOutcome::Rendered(html) => html,
                // Enumerated routes always resolve; slugs are unique
                ComposeOutcome::NotFound => continue,
            };

            let slug = segments.join("/");
            let output_path = self.gazette.public_dir.join(&slug).join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
            }
            fs::write(&output_path, &html)
                .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        Ok(())
    }

    /// Generate the index page listing all posts
    fn generate_index_page(&self, store: &ContentStore) -> Result<()> {
        let entries: Vec<IndexEntry> = store
            .posts()
            .map(|post| IndexEntry {
                title: post.title.clone(),
                href: encode_href(&post.path),
                date: post
                    .date
                    .as_ref()
                    .map(|d| format_date(d, &self.gazette.config.date_format)),
                datetime: post.date.as_ref().map(date_attr),
                description: post.description.clone(),
                content: post.content.clone(),
            })
            .collect();

        let mut context = base_context(&self.gazette.config, None);
        context.insert("posts", &entries);

        let html = self.renderer.render("index.html", &context)?;
        let output_path = self.gazette.public_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::debug!("Generated index: {:?}", output_path);

        Ok(())
    }

    /// Generate the terminal 404 page
    fn generate_not_found_page(&self) -> Result<()> {
        let context = base_context(&self.gazette.config, None);
        let html = self.renderer.render("404.html", &context)?;
        let output_path = self.gazette.public_dir.join("404.html");
        fs::write(&output_path, html)?;
        tracing::debug!("Generated 404: {:?}", output_path);

        Ok(())
    }

    /// Write embedded theme assets to the public directory
    fn write_theme_assets(&self) -> Result<()> {
        let css_dir = self.gazette.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("style.css"), STYLESHEET)?;

        let js_dir = self.gazette.public_dir.join("js");
        fs::create_dir_all(&js_dir)?;
        fs::write(js_dir.join("nav.js"), NAV_SCRIPT)?;

        Ok(())
    }

    /// Copy non-markdown source files (images etc.) into the public tree
    fn copy_source_assets(&self) -> Result<()> {
        if !self.gazette.source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(&self.gazette.source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&self.gazette.source_dir).unwrap_or(path);

            // Underscore directories (_posts, _authors, _drafts) are content,
            // not assets
            let first_component = relative
                .components()
                .next()
                .and_then(|c| c.as_os_str().to_str());
            if let Some(first) = first_component {
                if first.starts_with('_') {
                    continue;
                }
            }

            if is_markdown(path) {
                continue;
            }

            let target = self.gazette.public_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &target)?;
            tracing::debug!("Copied asset: {:?}", target);
        }

        Ok(())
    }
}

fn is_markdown(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
