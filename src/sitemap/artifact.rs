//! Sitemap artifact file handling.
//!
//! The artifact is a single shared file. All writes go through whole-file
//! replacement (write to a temp file in the same directory, then persist over
//! the target) so readers never observe a torn document.

use std::io::{self, Write};
use std::path::Path;

use super::builder::{self, SitemapEntry};

/// Create the artifact with a root-only document when it does not exist yet.
/// Returns true when a new file was written.
pub fn ensure_exists(path: &Path, site_url: &str) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    let initial = builder::build_sitemap(&[SitemapEntry::root(site_url)]);
    replace(path, &initial)?;
    Ok(true)
}

/// Atomic whole-file replace.
pub fn replace(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read-modify-write append of one entry before the closing root tag.
/// Returns false when the current document has no closing tag to anchor on.
pub fn append(path: &Path, entry: &SitemapEntry) -> io::Result<bool> {
    let current = std::fs::read_to_string(path)?;
    match builder::append_entry(&current, entry) {
        Some(updated) => {
            replace(path, &updated)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const SITE: &str = "https://airbrush.ai";

    #[test]
    fn test_ensure_exists_creates_root_only_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemap.xml");

        assert!(ensure_exists(&path, SITE).unwrap());
        let xml = std::fs::read_to_string(&path).unwrap();
        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.contains("<loc>https://airbrush.ai/</loc>"));

        // second call leaves the existing file alone
        assert!(!ensure_exists(&path, SITE).unwrap());
    }

    #[test]
    fn test_replace_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemap.xml");

        replace(&path, "first").unwrap();
        replace(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_append_grows_by_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemap.xml");
        ensure_exists(&path, SITE).unwrap();

        assert!(append(&path, &SitemapEntry::page(SITE, "new-slug", Utc::now())).unwrap());
        assert!(append(&path, &SitemapEntry::page(SITE, "other", Utc::now())).unwrap());

        let xml = std::fs::read_to_string(&path).unwrap();
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains("new-slug"));
        assert!(xml.contains("other"));
    }

    #[test]
    fn test_append_refuses_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemap.xml");
        replace(&path, "<urlset>").unwrap();

        assert!(!append(&path, &SitemapEntry::page(SITE, "x", Utc::now())).unwrap());
    }
}
