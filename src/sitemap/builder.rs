//! Pure XML composition for the sitemap artifact.

use chrono::{DateTime, SecondsFormat, Utc};

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xsi:schemaLocation="http://www.sitemaps.org/schemas/sitemap/0.9
        http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd">"#;

const CLOSING_TAG: &str = "</urlset>";

#[derive(Debug, Clone)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: DateTime<Utc>,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

impl SitemapEntry {
    /// Fixed root entry for the site itself.
    pub fn root(site_url: &str) -> Self {
        Self {
            loc: format!("{}/", site_url.trim_end_matches('/')),
            lastmod: Utc::now(),
            changefreq: "daily",
            priority: "1.0",
        }
    }

    pub fn category(site_url: &str, slug: &str, lastmod: DateTime<Utc>) -> Self {
        Self {
            loc: format!("{}/{}", site_url.trim_end_matches('/'), slug),
            lastmod,
            changefreq: "weekly",
            priority: "0.8",
        }
    }

    pub fn page(site_url: &str, slug: &str, lastmod: DateTime<Utc>) -> Self {
        Self {
            loc: format!("{}/{}", site_url.trim_end_matches('/'), slug),
            lastmod,
            changefreq: "weekly",
            priority: "0.7",
        }
    }
}

/// Escape the characters XML forbids in text content. Slugs come from user
/// input, so a literal `&` would otherwise produce an invalid document.
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_entry(entry: &SitemapEntry) -> String {
    format!(
        "\n  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
        escape_xml(&entry.loc),
        entry.lastmod.to_rfc3339_opts(SecondsFormat::Millis, true),
        entry.changefreq,
        entry.priority,
    )
}

/// Compose a complete sitemap document from entries, in order.
pub fn build_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(HEADER);
    for entry in entries {
        xml.push_str(&render_entry(entry));
    }
    xml.push('\n');
    xml.push_str(CLOSING_TAG);
    xml
}

/// Insert one rendered entry immediately before the closing root tag.
/// Returns None when the document carries no closing tag to anchor on.
pub fn append_entry(xml: &str, entry: &SitemapEntry) -> Option<String> {
    let at = xml.rfind(CLOSING_TAG)?;
    let mut updated = String::with_capacity(xml.len() + 256);
    updated.push_str(xml[..at].trim_end_matches(['\n', ' ']));
    updated.push_str(&render_entry(entry));
    updated.push('\n');
    updated.push_str(CLOSING_TAG);
    Some(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SITE: &str = "https://airbrush.ai";

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn entry_count(xml: &str) -> usize {
        xml.matches("<url>").count()
    }

    #[test]
    fn test_build_root_only() {
        let xml = build_sitemap(&[SitemapEntry::root(SITE)]);
        assert_eq!(entry_count(&xml), 1);
        assert!(xml.contains("<loc>https://airbrush.ai/</loc>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains(SITEMAP_NAMESPACE));
        assert!(xml.ends_with("</urlset>"));
    }

    #[test]
    fn test_build_categories_and_pages() {
        let entries = vec![
            SitemapEntry::root(SITE),
            SitemapEntry::category(SITE, "a", fixed_time()),
            SitemapEntry::category(SITE, "b", fixed_time()),
            SitemapEntry::page(SITE, "c", fixed_time()),
        ];
        let xml = build_sitemap(&entries);
        assert_eq!(entry_count(&xml), 4);
        assert!(xml.contains("<loc>https://airbrush.ai/a</loc>"));
        assert!(xml.contains("<loc>https://airbrush.ai/b</loc>"));
        assert!(xml.contains("<loc>https://airbrush.ai/c</loc>"));
        // category and page entries carry their distinct priorities
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains("<priority>0.7</priority>"));
    }

    #[test]
    fn test_build_is_deterministic_for_fixed_lastmod() {
        let entries = vec![
            SitemapEntry::category(SITE, "a", fixed_time()),
            SitemapEntry::page(SITE, "b", fixed_time()),
        ];
        assert_eq!(build_sitemap(&entries), build_sitemap(&entries));
    }

    #[test]
    fn test_append_adds_one_entry_and_keeps_prior_bytes() {
        let base = build_sitemap(&[
            SitemapEntry::root(SITE),
            SitemapEntry::category(SITE, "a", fixed_time()),
        ]);
        let appended =
            append_entry(&base, &SitemapEntry::page(SITE, "new-slug", fixed_time())).unwrap();

        assert_eq!(entry_count(&appended), entry_count(&base) + 1);
        assert!(appended.contains("<loc>https://airbrush.ai/new-slug</loc>"));
        // prior entries are byte-identical; the new one sits before the close
        let prefix = base.trim_end_matches("</urlset>").trim_end();
        assert!(appended.starts_with(prefix));
        assert!(appended.ends_with("</urlset>"));
    }

    #[test]
    fn test_append_without_closing_tag() {
        assert!(append_entry("<urlset>", &SitemapEntry::root(SITE)).is_none());
    }

    #[test]
    fn test_lastmod_is_iso8601() {
        let xml = render_entry(&SitemapEntry::page(SITE, "x", fixed_time()));
        assert!(xml.contains("<lastmod>2024-05-01T12:00:00.000Z</lastmod>"));
    }

    #[test]
    fn test_loc_escapes_xml_metacharacters() {
        let xml = render_entry(&SitemapEntry::category(SITE, "black&white", fixed_time()));
        assert!(xml.contains("<loc>https://airbrush.ai/black&amp;white</loc>"));

        let xml = render_entry(&SitemapEntry::page(SITE, "a<b>c", fixed_time()));
        assert!(xml.contains("<loc>https://airbrush.ai/a&lt;b&gt;c</loc>"));
    }

    #[test]
    fn test_trailing_slash_site_url_not_doubled() {
        let entry = SitemapEntry::category("https://airbrush.ai/", "anime", fixed_time());
        assert_eq!(entry.loc, "https://airbrush.ai/anime");
    }
}
