use chrono::{DateTime, Utc};

use crate::domain::IdentityKey;

/// A normalized feed item. Missing fields are empty strings, never absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub guid: String,
    pub description: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn new(title: impl Into<String>, link: impl Into<String>, guid: impl Into<String>) -> Self {
        let mut entry = Self {
            title: title.into(),
            link: link.into(),
            guid: guid.into(),
            ..Default::default()
        };
        entry.guid = entry.guid_or_fallback().to_string();
        entry
    }

    /// The guid, else the link, else the title.
    pub fn guid_or_fallback(&self) -> &str {
        [&self.guid, &self.link, &self.title]
            .into_iter()
            .map(|s| s.as_str())
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    pub fn identity_key(&self, site: &str, query: &str) -> IdentityKey {
        IdentityKey::compute(site, query, self.guid_or_fallback(), &self.link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_fallback_to_link() {
        let entry = Entry::new("Leica M3", "https://x/1", "");
        assert_eq!(entry.guid, "https://x/1");
    }

    #[test]
    fn test_guid_fallback_to_title() {
        let entry = Entry::new("Leica M3", "", "");
        assert_eq!(entry.guid, "Leica M3");
    }

    #[test]
    fn test_identity_key_uses_fallback() {
        let entry = Entry {
            title: "Leica M3".into(),
            link: "https://x/1".into(),
            ..Default::default()
        };
        assert_eq!(
            entry.identity_key("US", "leica"),
            IdentityKey::compute("US", "leica", "https://x/1", "https://x/1")
        );
    }

    #[test]
    fn test_same_listing_different_queries() {
        let entry = Entry::new("Leica M3", "https://x/1", "abc");
        assert_ne!(
            entry.identity_key("US", "leica"),
            entry.identity_key("US", "rangefinder")
        );
    }
}
