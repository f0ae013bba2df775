use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const FIELD_SEPARATOR: &[u8] = b"|";

/// Stable dedupe key for one entry as seen through one search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Hex SHA256 of `site|query|guid|link`.
    ///
    /// Callers substitute the link (then the title) for an empty guid before
    /// calling this; see [`Entry::identity_key`](crate::domain::Entry::identity_key).
    pub fn compute(site: &str, query: &str, guid: &str, link: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(site.as_bytes());
        hasher.update(FIELD_SEPARATOR);
        hasher.update(query.as_bytes());
        hasher.update(FIELD_SEPARATOR);
        hasher.update(guid.as_bytes());
        hasher.update(FIELD_SEPARATOR);
        hasher.update(link.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for IdentityKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for IdentityKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_deterministic() {
        let k1 = IdentityKey::compute("US", "vintage camera", "abc", "https://x/1");
        let k2 = IdentityKey::compute("US", "vintage camera", "abc", "https://x/1");
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_key_sensitive_to_every_field() {
        let base = IdentityKey::compute("US", "vintage camera", "abc", "https://x/1");
        assert_ne!(base, IdentityKey::compute("UK", "vintage camera", "abc", "https://x/1"));
        assert_ne!(base, IdentityKey::compute("US", "leica", "abc", "https://x/1"));
        assert_ne!(base, IdentityKey::compute("US", "vintage camera", "abd", "https://x/1"));
        assert_ne!(base, IdentityKey::compute("US", "vintage camera", "abc", "https://x/2"));
    }

    #[test]
    fn test_key_matches_joined_digest() {
        let key = IdentityKey::compute("US", "q", "g", "l");
        let expected = hex::encode(Sha256::digest(b"US|q|g|l"));
        assert_eq!(key.as_str(), expected);
    }

    #[test]
    fn test_key_is_hex_sha256() {
        let key = IdentityKey::compute("DE", "objektiv", "", "");
        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_key_serializes_as_plain_string() {
        let key = IdentityKey::from("deadbeef");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"deadbeef\"");
    }
}
