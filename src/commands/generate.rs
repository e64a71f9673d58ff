//! Generate static files

use anyhow::{Context, Result};
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::loader::ContentLoader;
use crate::content::ContentStore;
use crate::generator::Generator;
use crate::Gazette;

/// Generate the static site
pub fn run(gazette: &Gazette) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(gazette);
    let posts = loader.load_posts()?;
    let authors = loader.load_authors()?;

    tracing::info!("Loaded {} posts and {} authors", posts.len(), authors.len());

    let store = ContentStore::build(posts, authors)
        .context("content store rejected the loaded content")?;

    let generator = Generator::new(gazette)?;
    generator.generate(&store)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(gazette: &Gazette) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    // Watch source directory
    watcher.watch(gazette.source_dir.as_ref(), notify::RecursiveMode::Recursive)?;

    // Watch config file
    let config_path = gazette.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(config_path.as_ref(), notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = run(gazette) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Continue waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}
