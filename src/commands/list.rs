//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::content::ContentStore;
use crate::Gazette;

/// List site content by type
pub fn run(gazette: &Gazette, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(gazette);

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let date = post
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "----------".to_string());
                println!("  {} - {} [{}]", date, post.title, post.source);
            }
        }
        "author" | "authors" => {
            let authors = loader.load_authors()?;
            println!("Authors ({}):", authors.len());
            for author in authors {
                println!("  {} - @{} [{}]", author.name, author.handle, author.source);
            }
        }
        "route" | "routes" => {
            let store = ContentStore::build(loader.load_posts()?, loader.load_authors()?)?;
            let paths = store.static_paths();
            println!("Routes ({}):", paths.len());
            for segments in paths {
                println!("  /{}/", segments.join("/"));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, author, route",
                content_type
            );
        }
    }

    Ok(())
}
