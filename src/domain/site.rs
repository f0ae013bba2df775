use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::app::{ListwatchError, Result};

/// Marketplace a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Us,
    Uk,
    De,
    Fr,
}

impl Site {
    pub const ALL: [Site; 4] = [Site::Us, Site::Uk, Site::De, Site::Fr];

    pub fn code(&self) -> &'static str {
        match self {
            Site::Us => "US",
            Site::Uk => "UK",
            Site::De => "DE",
            Site::Fr => "FR",
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Site::Us => "https://www.ebay.com",
            Site::Uk => "https://www.ebay.co.uk",
            Site::De => "https://www.ebay.de",
            Site::Fr => "https://www.ebay.fr",
        }
    }

    /// RSS URL for a search, newest listings first (`_sop=10`).
    pub fn feed_url(&self, query: &str) -> Result<Url> {
        let base = format!("{}/sch/i.html", self.base_url());
        let url = Url::parse_with_params(
            &base,
            &[("_nkw", query), ("_sop", "10"), ("rt", "nc"), ("_rss", "1")],
        )?;
        Ok(url)
    }
}

impl FromStr for Site {
    type Err = ListwatchError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_uppercase();
        Site::ALL
            .into_iter()
            .find(|site| site.code() == code)
            .ok_or_else(|| ListwatchError::UnknownSite(s.to_string()))
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_site_codes() {
        assert_eq!("US".parse::<Site>().unwrap(), Site::Us);
        assert_eq!(" uk ".parse::<Site>().unwrap(), Site::Uk);
        assert_eq!("de".parse::<Site>().unwrap(), Site::De);
        assert!("IT".parse::<Site>().is_err());
        assert!("".parse::<Site>().is_err());
    }

    #[test]
    fn test_feed_url_encodes_query() {
        let url = Site::Us.feed_url("vintage camera & lens").unwrap();
        assert_eq!(url.host_str(), Some("www.ebay.com"));
        assert_eq!(url.path(), "/sch/i.html");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs[0], ("_nkw".into(), "vintage camera & lens".into()));
        assert!(pairs.contains(&("_sop".into(), "10".into())));
        assert!(pairs.contains(&("_rss".into(), "1".into())));
        assert!(url.as_str().contains("_nkw=vintage+camera+%26+lens"));
    }

    #[test]
    fn test_feed_url_per_site() {
        assert!(Site::Fr
            .feed_url("objectif")
            .unwrap()
            .as_str()
            .starts_with("https://www.ebay.fr/sch/i.html?"));
    }
}
