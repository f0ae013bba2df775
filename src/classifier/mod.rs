//! Best-effort display attributes pulled out of listing text.
//!
//! eBay feed descriptions vary by site and over time, so both functions are
//! heuristics. A miss is the default outcome, not an error.
//!
//! Auction markers are matched as whole words, so inflected forms have to be
//! listed explicitly.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::ListingType;

static CURRENCY_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(USD|EUR|GBP)\s*([0-9][0-9.,]*)").expect("valid regex"));

static CURRENCY_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([$€£])\s*([0-9][0-9.,]*)").expect("valid regex"));

const AUCTION_WORDS: &[&str] = &[
    "auction", "auctions", "auctioned", "bid", "bids", "bidding", "gebot", "gebote", "auktion",
    "enchère", "enchères", "enchere", "encheres", "asta",
];

const BUY_IT_NOW_PHRASES: &[&str] = &[
    "buy it now",
    "sofort-kaufen",
    "sofort kaufen",
    "achat immédiat",
    "achat immediat",
];

/// First price-looking token, e.g. `EUR 450.00` or `$ 12.34`.
pub fn extract_price(text: &str) -> Option<String> {
    if let Some(caps) = CURRENCY_CODE.captures(text) {
        return Some(format!("{} {}", caps[1].to_uppercase(), trim_amount(&caps[2])));
    }
    CURRENCY_SYMBOL
        .captures(text)
        .map(|caps| format!("{} {}", &caps[1], trim_amount(&caps[2])))
}

/// Auction markers win over fixed-price markers; otherwise `Listing`.
pub fn extract_format(text: &str, title: &str) -> ListingType {
    let blob = format!("{} {}", text, title).to_lowercase();

    let is_auction = blob
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| AUCTION_WORDS.contains(&word));
    if is_auction {
        return ListingType::Auction;
    }

    if BUY_IT_NOW_PHRASES.iter().any(|p| blob.contains(p)) {
        return ListingType::BuyItNow;
    }

    ListingType::Listing
}

fn trim_amount(amount: &str) -> &str {
    amount.trim_end_matches(['.', ','])
}
