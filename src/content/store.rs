//! In-memory content store with slug resolution and author linking
//!
//! The store is built once per generation pass and read-only afterwards.
//! Post and author slugs are unique; duplicates are rejected at build time.

use indexmap::IndexMap;
use thiserror::Error;

use super::{Author, Post};

/// Author slugs are the file stem prefixed with this
pub const AUTHOR_SLUG_PREFIX: &str = "authors/";

/// Error raised while building the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate post slug: {0}")]
    DuplicateSlug(String),

    #[error("duplicate author slug: {0}")]
    DuplicateAuthorSlug(String),
}

/// The pre-built, read-only collection of posts and author records
#[derive(Debug)]
pub struct ContentStore {
    posts: IndexMap<String, Post>,
    authors: IndexMap<String, Author>,
}

impl ContentStore {
    /// Build a store from loaded content, rejecting duplicate slugs
    pub fn build(posts: Vec<Post>, authors: Vec<Author>) -> Result<Self, StoreError> {
        let mut post_map = IndexMap::with_capacity(posts.len());
        for post in posts {
            if post_map.contains_key(&post.slug) {
                return Err(StoreError::DuplicateSlug(post.slug));
            }
            post_map.insert(post.slug.clone(), post);
        }

        let mut author_map = IndexMap::with_capacity(authors.len());
        for author in authors {
            if author_map.contains_key(&author.slug) {
                return Err(StoreError::DuplicateAuthorSlug(author.slug));
            }
            author_map.insert(author.slug.clone(), author);
        }

        Ok(Self {
            posts: post_map,
            authors: author_map,
        })
    }

    /// Look up a post by its exact slug
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.get(slug)
    }

    /// Look up an author by its exact slug
    pub fn find_author_by_slug(&self, slug: &str) -> Option<&Author> {
        self.authors.get(slug)
    }

    /// Resolve requested path segments to a post
    ///
    /// Segments are joined with `/` to form the candidate slug; the match is
    /// exact and case-sensitive. `None` means the page does not exist and the
    /// caller must terminate with the not-found outcome.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Post> {
        let slug = segments
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join("/");
        self.find_by_slug(&slug)
    }

    /// Resolve author references to records, preserving input order
    ///
    /// A reference with no matching author yields `None` in place; renderers
    /// skip those entries rather than erroring.
    pub fn link_authors(&self, refs: &[String]) -> Vec<Option<&Author>> {
        refs.iter()
            .map(|r| self.find_author_by_slug(&format!("{}{}", AUTHOR_SLUG_PREFIX, r)))
            .collect()
    }

    /// Enumerate all known slugs as path-segment sequences, for
    /// ahead-of-time page generation
    pub fn static_paths(&self) -> Vec<Vec<String>> {
        self.posts.values().map(|p| p.segments()).collect()
    }

    /// All posts, in insertion (load) order
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    /// All author records, in insertion (load) order
    pub fn authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.values()
    }

    /// Number of posts in the store
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Number of author records in the store
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, authors: &[&str]) -> Post {
        let mut post = Post::new(
            format!("Post {}", slug),
            slug.to_string(),
            format!("_posts/{}.md", slug),
        );
        post.authors = authors.iter().map(|a| a.to_string()).collect();
        post
    }

    fn author(stem: &str) -> Author {
        Author::new(
            format!("{}{}", AUTHOR_SLUG_PREFIX, stem),
            stem.to_string(),
            format!("_authors/{}.md", stem),
        )
    }

    fn store() -> ContentStore {
        ContentStore::build(
            vec![
                post("hello", &["jane-doe"]),
                post("2023/deep-dive", &["jane-doe", "ghost"]),
                post("about", &[]),
            ],
            vec![author("jane-doe")],
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_known_slugs() {
        let store = store();
        // Every known slug resolves to its own record via its segments
        for segments in store.static_paths() {
            let post = store.resolve(&segments).unwrap();
            assert_eq!(post.slug, segments.join("/"));
        }
    }

    #[test]
    fn test_resolve_multi_segment() {
        let store = store();
        let post = store.resolve(&["2023", "deep-dive"]).unwrap();
        assert_eq!(post.slug, "2023/deep-dive");
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        let store = store();
        assert!(store.resolve(&["nope"]).is_none());
        assert!(store.resolve(&["2023", "missing"]).is_none());
        // Exact match only: no partial or prefix matching
        assert!(store.resolve(&["2023"]).is_none());
        // Case-sensitive
        assert!(store.resolve(&["Hello"]).is_none());
    }

    #[test]
    fn test_link_authors_preserves_order_and_dangles() {
        let store = store();
        let post = store.find_by_slug("2023/deep-dive").unwrap();
        let linked = store.link_authors(&post.authors);

        assert_eq!(linked.len(), 2);
        assert_eq!(linked[0].unwrap().slug, "authors/jane-doe");
        assert!(linked[1].is_none());
    }

    #[test]
    fn test_link_authors_empty() {
        let store = store();
        let post = store.find_by_slug("about").unwrap();
        assert!(store.link_authors(&post.authors).is_empty());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = ContentStore::build(vec![post("hello", &[]), post("hello", &[])], Vec::new())
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug(slug) if slug == "hello"));
    }

    #[test]
    fn test_duplicate_author_slug_rejected() {
        let err = ContentStore::build(Vec::new(), vec![author("jane-doe"), author("jane-doe")])
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateAuthorSlug(_)));
    }

    #[test]
    fn test_static_paths_order_matches_load_order() {
        let store = store();
        let paths = store.static_paths();
        assert_eq!(
            paths,
            vec![
                vec!["hello".to_string()],
                vec!["2023".to_string(), "deep-dive".to_string()],
                vec!["about".to_string()],
            ]
        );
    }
}
