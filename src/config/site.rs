//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Writing
    pub render_drafts: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Date format (Moment.js style, see helpers::date)
    pub date_format: String,

    // Navigation
    #[serde(default)]
    pub navbar: Vec<NavItem>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Gazette".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            render_drafts: false,
            highlight: HighlightConfig::default(),

            date_format: "MMMM DD, YYYY".to_string(),

            navbar: vec![
                NavItem {
                    title: "Blog".to_string(),
                    href: "/blog".to_string(),
                },
                NavItem {
                    title: "About".to_string(),
                    href: "/about".to_string(),
                },
            ],

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// A top-level navigation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    pub href: String,
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Gazette");
        assert_eq!(config.root, "/");
        assert_eq!(config.date_format, "MMMM DD, YYYY");
        assert_eq!(config.navbar.len(), 2);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
url: https://blog.example.com
navbar:
  - title: Posts
    href: /posts
  - title: Projects
    href: /projects
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.url, "https://blog.example.com");
        assert_eq!(config.navbar[1].title, "Projects");
        assert_eq!(config.navbar[1].href, "/projects");
        // Unlisted fields fall back to defaults
        assert_eq!(config.source_dir, "source");
    }

    #[test]
    fn test_empty_navbar_allowed() {
        let config: SiteConfig = serde_yaml::from_str("navbar: []").unwrap();
        assert!(config.navbar.is_empty());
    }
}
