use chrono::Utc;
use feed_rs::parser;
use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app::{ListwatchError, Result};
use crate::domain::Entry;

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Turns RSS/Atom bytes into [`Entry`] values with empty-string defaults.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<Vec<Entry>> {
        // Items without an id come back with an empty one so `Entry` can fall
        // back to the link.
        let feed = parser::Builder::new()
            .id_generator(|_, _, _| String::new())
            .build()
            .parse(body)
            .map_err(|e| ListwatchError::FeedParse(e.to_string()))?;

        let entries = feed
            .entries
            .into_iter()
            .map(|entry| {
                let title = entry
                    .title
                    .map(|t| decode_html_entities(&t.content).trim().to_string())
                    .unwrap_or_default();
                let link = entry
                    .links
                    .first()
                    .map(|l| l.href.trim().to_string())
                    .unwrap_or_default();
                let description = entry
                    .summary
                    .map(|s| s.content)
                    .or_else(|| entry.content.and_then(|c| c.body))
                    .map(|html| strip_html(&html))
                    .unwrap_or_default();

                let mut normalized = Entry::new(title, link, entry.id.trim());
                normalized.description = description;
                normalized.published_at = entry
                    .published
                    .or(entry.updated)
                    .map(|dt| dt.with_timezone(&Utc));
                normalized
            })
            .collect();

        Ok(entries)
    }
}

/// Decode entities, drop tags and collapse whitespace.
pub fn strip_html(html: &str) -> String {
    let decoded = decode_html_entities(html);
    let text = LINE_BREAK.replace_all(&decoded, "\n");
    let text = TAG.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IdentityKey;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>eBay: vintage camera</title>
    <link>https://www.ebay.com/sch/i.html?_nkw=vintage+camera</link>
    <description>New listings</description>
    <item>
      <title>Leica M3 &amp; Summicron</title>
      <link>https://www.ebay.com/itm/1</link>
      <guid>abc</guid>
      <pubDate>Mon, 15 Jan 2024 08:30:00 GMT</pubDate>
      <description><![CDATA[<table><tr><td><strong>EUR 450.00</strong><br/>Buy It Now</td></tr></table>]]></description>
    </item>
    <item>
      <title>Rolleiflex 2.8F</title>
      <link>https://www.ebay.com/itm/2</link>
      <description>No markers here</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Test Feed</title>
  <id>urn:feed</id>
  <updated>2024-01-01T00:00:00Z</updated>
  <entry>
    <title>Atom Entry 1</title>
    <link href="https://example.com/atom1"/>
    <id>atom-entry-1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <summary>GBP 20 or best offer</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let entries = Normalizer::new().normalize(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Leica M3 & Summicron");
        assert_eq!(entries[0].link, "https://www.ebay.com/itm/1");
        assert_eq!(entries[0].guid, "abc");
        assert_eq!(entries[0].description, "EUR 450.00 Buy It Now");
        assert!(entries[0].published_at.is_some());
    }

    #[test]
    fn test_missing_guid_falls_back_to_link() {
        let entries = Normalizer::new().normalize(RSS_SAMPLE.as_bytes()).unwrap();
        let entry = &entries[1];

        assert_eq!(entry.link, "https://www.ebay.com/itm/2");
        assert_eq!(entry.guid, entry.link);
        assert_eq!(entry.published_at, None);
        assert_eq!(
            entry.identity_key("US", "leica"),
            IdentityKey::compute("US", "leica", &entry.link, &entry.link)
        );
    }

    #[test]
    fn test_missing_guid_key_ignores_title() {
        let before = r#"<rss version="2.0"><channel><title>t</title>
<item><title>Rolleiflex</title><link>https://x/2</link></item>
</channel></rss>"#;
        let renamed = before.replace("<title>Rolleiflex</title>", "<title>Rolleiflex 2.8F mint</title>");

        let normalizer = Normalizer::new();
        let a = normalizer.normalize(before.as_bytes()).unwrap();
        let b = normalizer.normalize(renamed.as_bytes()).unwrap();

        assert_eq!(a[0].guid, "https://x/2");
        assert_eq!(a[0].identity_key("US", "q"), b[0].identity_key("US", "q"));
    }

    #[test]
    fn test_parse_atom() {
        let entries = Normalizer::new().normalize(ATOM_SAMPLE.as_bytes()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Atom Entry 1");
        assert_eq!(entries[0].link, "https://example.com/atom1");
        assert_eq!(entries[0].guid, "atom-entry-1");
        assert_eq!(entries[0].description, "GBP 20 or best offer");
    }

    #[test]
    fn test_non_feed_is_parse_error() {
        let err = Normalizer::new()
            .normalize(b"<html><body>Please verify you are a human</body></html>")
            .unwrap_err();
        assert!(matches!(err, ListwatchError::FeedParse(_)));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Price:&nbsp;<b>$12</b><BR>Ends   soon</p>"),
            "Price: $12 Ends soon"
        );
        assert_eq!(strip_html(""), "");
    }
}
