use std::fmt;

use crate::domain::{Bucket, Entry};

pub const MAX_TITLE_CHARS: usize = 256;

/// Best-effort listing format derived from the entry text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingType {
    Auction,
    BuyItNow,
    #[default]
    Listing,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Auction => "Auction",
            ListingType::BuyItNow => "Buy It Now",
            ListingType::Listing => "Listing",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub bucket: Bucket,
    pub title: String,
    pub link: String,
    pub description: String,
    pub price: Option<String>,
    pub listing_type: ListingType,
    pub footer: Option<String>,
}

impl Notification {
    pub fn for_entry(
        entry: &Entry,
        site: &str,
        query: &str,
        bucket: Bucket,
        price: Option<String>,
        listing_type: ListingType,
    ) -> Self {
        let title = if entry.title.is_empty() {
            format!("{} New eBay listing", bucket.emoji())
        } else {
            format!("{} {}", bucket.emoji(), entry.title)
        };

        Self {
            bucket,
            title: truncate_chars(&title, MAX_TITLE_CHARS),
            link: entry.link.clone(),
            description: format!("**Site:** {}  •  **Query:** {}", site, query),
            price,
            listing_type,
            footer: entry.published_at.map(|dt| dt.to_rfc2822()),
        }
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_title_carries_bucket_emoji() {
        let entry = Entry::new("Leica M3", "https://x/1", "abc");
        let n = Notification::for_entry(&entry, "US", "leica", Bucket::Camera, None, ListingType::Listing);
        assert_eq!(n.title, "📷 Leica M3");
        assert_eq!(n.description, "**Site:** US  •  **Query:** leica");
        assert_eq!(n.footer, None);
    }

    #[test]
    fn test_empty_title_placeholder() {
        let entry = Entry::new("", "https://x/1", "abc");
        let n = Notification::for_entry(&entry, "US", "leica", Bucket::General, None, ListingType::Listing);
        assert_eq!(n.title, "📦 New eBay listing");
    }

    #[test]
    fn test_title_truncated_on_char_boundary() {
        let entry = Entry::new("é".repeat(400), "https://x/1", "abc");
        let n = Notification::for_entry(&entry, "FR", "q", Bucket::Priority, None, ListingType::Auction);
        assert_eq!(n.title.chars().count(), MAX_TITLE_CHARS);
        assert!(n.title.starts_with("🔥 é"));
    }

    #[test]
    fn test_footer_from_published_at() {
        let mut entry = Entry::new("Leica M3", "https://x/1", "abc");
        entry.published_at = Some(Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap());
        let n = Notification::for_entry(&entry, "US", "q", Bucket::General, None, ListingType::Listing);
        assert_eq!(n.footer.as_deref(), Some("Mon, 15 Jan 2024 08:30:00 +0000"));
    }

    #[test]
    fn test_listing_type_display() {
        assert_eq!(ListingType::BuyItNow.to_string(), "Buy It Now");
        assert_eq!(ListingType::default(), ListingType::Listing);
    }
}
