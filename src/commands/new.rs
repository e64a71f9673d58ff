//! Create a new post, draft, or author record

use anyhow::Result;
use std::fs;

use crate::Gazette;

/// Create a new post/draft/author from a scaffold
pub fn create_content(gazette: &Gazette, title: &str, layout: &str, path: Option<&str>) -> Result<()> {
    let now = chrono::Local::now();

    // Determine the target directory based on layout
    let target_dir = match layout {
        "draft" => gazette.source_dir.join("_drafts"),
        "author" => gazette.source_dir.join("_authors"),
        _ => gazette.source_dir.join("_posts"),
    };

    fs::create_dir_all(&target_dir)?;

    // Generate filename
    let filename = if let Some(p) = path {
        format!("{}.md", p)
    } else {
        format!("{}.md", slug::slugify(title))
    };

    let file_path = target_dir.join(&filename);

    // Load scaffold template
    let scaffold_path = gazette
        .base_dir
        .join("scaffolds")
        .join(format!("{}.md", layout));
    let scaffold_content = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        // Default scaffold
        match layout {
            "author" => "---\ntitle: {{ title }}\navatar:\nhandle:\n---\n".to_string(),
            _ => "---\ntitle: {{ title }}\ndate: {{ date }}\n---\n".to_string(),
        }
    };

    // Replace template variables
    let content = scaffold_content
        .replace("{{ title }}", title)
        .replace("{{ date }}", &now.format("%Y-%m-%d %H:%M:%S").to_string());

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

/// Run the new command
pub fn run(gazette: &Gazette, title: &str, layout: Option<&str>) -> Result<()> {
    let layout = layout.unwrap_or("post");
    create_content(gazette, title, layout, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_from_default_scaffold() {
        let dir = tempfile::tempdir().unwrap();
        let gazette = Gazette::new(dir.path()).unwrap();

        create_content(&gazette, "My New Post", "post", None).unwrap();

        let path = dir.path().join("source/_posts/my-new-post.md");
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("title: My New Post"));
        assert!(content.contains("date: "));
    }

    #[test]
    fn test_create_author() {
        let dir = tempfile::tempdir().unwrap();
        let gazette = Gazette::new(dir.path()).unwrap();

        create_content(&gazette, "Jane Doe", "author", None).unwrap();

        let path = dir.path().join("source/_authors/jane-doe.md");
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("title: Jane Doe"));
        assert!(content.contains("handle:"));
    }

    #[test]
    fn test_existing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gazette = Gazette::new(dir.path()).unwrap();

        create_content(&gazette, "Twice", "post", None).unwrap();
        assert!(create_content(&gazette, "Twice", "post", None).is_err());
    }
}
