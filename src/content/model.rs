//! Post and Author models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date; posts without one render no date label
    pub date: Option<DateTime<Local>>,

    /// Last updated date
    pub updated: Option<DateTime<Local>>,

    /// Short description, shown on the index page
    pub description: Option<String>,

    /// Hero image URL
    pub image: Option<String>,

    /// Ordered author references (author file stems)
    pub authors: Vec<String>,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Source file path (relative)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Slug uniquely naming this post, e.g. "2023/my-post"
    pub slug: String,

    /// URL path (with root), e.g. "/2023/my-post/"
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    /// Whether the post is published
    pub published: bool,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, slug: String, source: String) -> Self {
        Self {
            title,
            date: None,
            updated: None,
            description: None,
            image: None,
            authors: Vec::new(),
            raw: String::new(),
            content: String::new(),
            source: source.clone(),
            full_source: PathBuf::from(&source),
            slug,
            path: String::new(),
            permalink: String::new(),
            published: true,
            extra: HashMap::new(),
        }
    }

    /// The slug split into its path segments
    pub fn segments(&self) -> Vec<String> {
        self.slug.split('/').map(|s| s.to_string()).collect()
    }
}

/// An author record, referenced from posts by file stem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Slug uniquely naming this author, e.g. "authors/jane-doe"
    pub slug: String,

    /// Display name
    pub name: String,

    /// Avatar image URL
    pub avatar: String,

    /// Social handle, used to build the profile link
    pub handle: String,

    /// Rendered HTML bio
    pub content: String,

    /// Source file path (relative)
    pub source: String,
}

impl Author {
    /// Create a new author with minimal required fields
    pub fn new(slug: String, name: String, source: String) -> Self {
        Self {
            slug,
            name,
            avatar: String::new(),
            handle: String::new(),
            content: String::new(),
            source,
        }
    }
}
