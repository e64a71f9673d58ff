//! Built-in blog theme using Tera templates
//!
//! All templates and client assets are embedded directly in the binary;
//! there is no external theme directory to load.

use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{NavItem, SiteConfig};
use crate::content::Author;
use crate::helpers::url_for;

/// Stylesheet written to public/css/style.css
pub const STYLESHEET: &str = include_str!("blog/assets/style.css");

/// Mobile navigation script written to public/js/nav.js
///
/// Opening the overlay saves the document body's computed overflow style
/// before setting it to hidden; closing the overlay or leaving the page
/// restores the saved value.
pub const NAV_SCRIPT: &str = include_str!("blog/assets/nav.js");

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post bodies are pre-rendered HTML, so autoescaping would
        // double-escape them
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("404.html", include_str!("blog/404.html")),
            ("partials/nav.html", include_str!("blog/partials/nav.html")),
            (
                "partials/byline.html",
                include_str!("blog/partials/byline.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Create the context shared by every page
///
/// `segment` is the first path segment of the page being rendered (None on
/// the index and 404 pages); it drives the active-item highlight.
pub fn base_context(config: &SiteConfig, segment: Option<&str>) -> Context {
    let mut context = Context::new();
    context.insert("config", config);
    context.insert("nav", &build_nav(&config.navbar, segment));
    context.insert("index_url", &url_for(config, ""));
    context.insert("css_url", &url_for(config, "css/style.css"));
    context.insert("nav_js_url", &url_for(config, "js/nav.js"));
    context.insert("current_year", &Local::now().format("%Y").to_string());
    context
}

/// Compute navigation entries with the active item highlighted
///
/// An item is active when its href starts with `/<segment>`, matching the
/// current route's first segment.
pub fn build_nav(items: &[NavItem], segment: Option<&str>) -> Vec<NavEntry> {
    items
        .iter()
        .map(|item| {
            let active = match segment {
                Some(seg) if !seg.is_empty() => item.href.starts_with(&format!("/{}", seg)),
                _ => false,
            };
            NavEntry {
                title: item.title.clone(),
                href: item.href.clone(),
                active,
            }
        })
        .collect()
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    Ok(tera::Value::String(result))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "…".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Data structures for template context

/// A navigation shell entry
#[derive(Debug, Clone, Serialize)]
pub struct NavEntry {
    pub title: String,
    pub href: String,
    pub active: bool,
}

/// A resolved author as rendered in the byline
#[derive(Debug, Clone, Serialize)]
pub struct BylineAuthor {
    pub name: String,
    pub avatar: String,
    pub handle: String,
    pub profile_url: String,
}

impl From<&Author> for BylineAuthor {
    fn from(author: &Author) -> Self {
        Self {
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            handle: author.handle.clone(),
            profile_url: format!("https://www.linkedin.com/in/{}", author.handle),
        }
    }
}

/// A post as rendered on its own page
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub title: String,
    /// Formatted date label; None omits the label entirely
    pub date: Option<String>,
    /// Machine-readable datetime attribute
    pub datetime: Option<String>,
    pub image: Option<String>,
    /// Resolved authors only; an empty list omits the byline block
    pub authors: Vec<BylineAuthor>,
    pub content: String,
}

/// A post as rendered in the index listing
#[derive(Debug, Clone, Serialize)]
pub struct IndexEntry {
    pub title: String,
    pub href: String,
    pub date: Option<String>,
    pub datetime: Option<String>,
    pub description: Option<String>,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_page() -> PostPage {
        PostPage {
            title: "Hello World".to_string(),
            date: Some("January 15, 2024".to_string()),
            datetime: Some("2024-01-15".to_string()),
            image: Some("/images/hero.png".to_string()),
            authors: vec![BylineAuthor {
                name: "Jane Doe".to_string(),
                avatar: "/images/jane.png".to_string(),
                handle: "janedoe".to_string(),
                profile_url: "https://www.linkedin.com/in/janedoe".to_string(),
            }],
            content: "<p>Body text.</p>".to_string(),
        }
    }

    fn render_post(page: &PostPage) -> String {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let mut context = base_context(&config, Some("hello-world"));
        context.insert("post", page);
        renderer.render("post.html", &context).unwrap()
    }

    #[test]
    fn test_post_page_full() {
        let html = render_post(&post_page());

        assert!(html.contains("Published on January 15, 2024"));
        assert!(html.contains(r#"datetime="2024-01-15""#));
        assert!(html.contains("<h1 class=\"post-title\">Hello World</h1>"));
        assert!(html.contains(r#"src="/images/hero.png""#));
        assert!(html.contains("<p>Body text.</p>"));
        assert!(html.contains("See all posts"));
        // Exactly one byline entry
        assert_eq!(html.matches("byline-author").count(), 1);
        assert!(html.contains("@janedoe"));
    }

    #[test]
    fn test_post_without_date_omits_label() {
        let mut page = post_page();
        page.date = None;
        page.datetime = None;

        let html = render_post(&page);
        assert!(!html.contains("Published on"));
        assert!(!html.contains("post-date"));
    }

    #[test]
    fn test_post_without_authors_omits_byline() {
        let mut page = post_page();
        page.authors.clear();

        let html = render_post(&page);
        assert!(!html.contains("byline"));
    }

    #[test]
    fn test_post_without_image_omits_hero() {
        let mut page = post_page();
        page.image = None;

        let html = render_post(&page);
        assert!(!html.contains("post-hero"));
    }

    #[test]
    fn test_nav_active_by_prefix() {
        let items = vec![
            NavItem {
                title: "Blog".to_string(),
                href: "/blog".to_string(),
            },
            NavItem {
                title: "About".to_string(),
                href: "/about".to_string(),
            },
        ];

        let nav = build_nav(&items, Some("blog"));
        assert!(nav[0].active);
        assert!(!nav[1].active);

        let nav = build_nav(&items, None);
        assert!(!nav[0].active && !nav[1].active);
    }

    #[test]
    fn test_layout_ships_hidden_overlay_and_script() {
        let html = render_post(&post_page());

        assert!(html.contains("data-nav-overlay hidden"));
        assert!(html.contains("data-nav-toggle"));
        assert!(html.contains(r#"<script src="/js/nav.js"></script>"#));
        // Active highlight is a class on the matching entry
        assert!(html.contains("nav-link"));
    }

    #[test]
    fn test_nav_script_restores_previous_overflow() {
        // The script must save the computed style before locking and
        // restore that exact value on release
        assert!(NAV_SCRIPT.contains("getComputedStyle(document.body).overflow"));
        assert!(NAV_SCRIPT.contains(r#"document.body.style.overflow = "hidden""#));
        assert!(NAV_SCRIPT.contains("document.body.style.overflow = previousOverflow"));
        assert!(NAV_SCRIPT.contains("pagehide"));
    }

    #[test]
    fn test_index_summary_fallback() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();

        let entries = vec![IndexEntry {
            title: "Long One".to_string(),
            href: "/long-one/".to_string(),
            date: None,
            datetime: None,
            description: None,
            content: format!("<p>{}</p>", "word ".repeat(100)),
        }];

        let mut context = base_context(&config, None);
        context.insert("posts", &entries);
        let html = renderer.render("index.html", &context).unwrap();

        assert!(html.contains("Long One"));
        // Fallback summary is stripped and truncated
        assert!(html.contains("…"));
        assert!(!html.contains("<p>word"));
    }

    #[test]
    fn test_index_empty_state() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();

        let mut context = base_context(&config, None);
        context.insert("posts", &Vec::<IndexEntry>::new());
        let html = renderer.render("index.html", &context).unwrap();

        assert!(html.contains("Nothing published yet."));
    }

    #[test]
    fn test_not_found_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();

        let context = base_context(&config, None);
        let html = renderer.render("404.html", &context).unwrap();

        assert!(html.contains("404"));
        assert!(html.contains("See all posts"));
    }
}
