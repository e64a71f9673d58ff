//! Initialize a new Gazette site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Gazette;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::create_dir_all(target_dir.join("source/_drafts"))?;
    fs::create_dir_all(target_dir.join("source/_authors"))?;
    fs::create_dir_all(target_dir.join("source/images"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    // Create default _config.yml
    let config_content = r#"# Gazette Configuration

# Site
title: Gazette
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public

# Writing
render_drafts: false
highlight:
  theme: base16-ocean.dark
  line_number: false

# Date format shown in the "Published on" label
date_format: MMMM DD, YYYY

# Navigation
navbar:
  - title: Blog
    href: /blog
  - title: About
    href: /about
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    // Create scaffold templates
    let post_scaffold = r#"---
title: {{ title }}
date: {{ date }}
authors:
---
"#;

    let draft_scaffold = r#"---
title: {{ title }}
authors:
---
"#;

    let author_scaffold = r#"---
title: {{ title }}
avatar:
handle:
---
"#;

    fs::write(target_dir.join("scaffolds/post.md"), post_scaffold)?;
    fs::write(target_dir.join("scaffolds/draft.md"), draft_scaffold)?;
    fs::write(target_dir.join("scaffolds/author.md"), author_scaffold)?;

    // Create a sample author and a sample post referencing it
    let sample_author = r#"---
title: John Doe
avatar: /images/john-doe.png
handle: johndoe
---

John writes about whatever crosses his desk.
"#;

    fs::write(
        target_dir.join("source/_authors/john-doe.md"),
        sample_author,
    )?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
authors:
  - john-doe
---

Welcome to your new Gazette site. This is your very first post.

## Quick Start

### Create a new post

```bash
$ gazette new "My New Post"
```

### Run the preview server

```bash
$ gazette server
```

### Generate static files

```bash
$ gazette generate
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(target_dir.join("source/_posts/hello-world.md"), sample_post)?;

    Ok(())
}

/// Run the init command with an existing Gazette instance
pub fn run(gazette: &Gazette) -> Result<()> {
    init_site(&gazette.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_site_scaffolds() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        assert!(dir.path().join("scaffolds/post.md").exists());
        assert!(dir.path().join("scaffolds/author.md").exists());
        assert!(dir.path().join("source/_posts/hello-world.md").exists());
        assert!(dir.path().join("source/_authors/john-doe.md").exists());

        // The scaffolded site loads with a valid config
        let gazette = Gazette::new(dir.path()).unwrap();
        assert_eq!(gazette.config.title, "Gazette");
        assert_eq!(gazette.config.navbar.len(), 2);
    }
}
