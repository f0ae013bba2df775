use std::collections::HashMap;
use std::fmt;

use crate::config::WebhookConfig;
use crate::domain::Bucket;

/// A notification sink, currently a Discord webhook URL.
#[derive(Clone, PartialEq, Eq)]
pub struct Destination(String);

impl Destination {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

// Webhook URLs embed their token, keep them out of logs.
impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Destination(..)")
    }
}

/// Maps bucket labels to destinations with a `general` fallback.
#[derive(Debug, Clone, Default)]
pub struct Router {
    destinations: HashMap<Bucket, Destination>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(webhooks: &WebhookConfig) -> Self {
        let destinations = Bucket::ALL
            .into_iter()
            .filter_map(|bucket| webhooks.get(bucket).map(|url| (bucket, Destination::new(url))))
            .collect();
        Self { destinations }
    }

    pub fn with_destination(mut self, bucket: Bucket, destination: Destination) -> Self {
        self.destinations.insert(bucket, destination);
        self
    }

    /// Destination for a label, else the default bucket's, else `None`.
    pub fn route(&self, label: &str) -> Option<&Destination> {
        self.route_bucket(Bucket::resolve(label))
    }

    pub fn route_bucket(&self, bucket: Bucket) -> Option<&Destination> {
        self.destinations
            .get(&bucket)
            .or_else(|| self.destinations.get(&Bucket::General))
    }

    pub fn is_configured(&self, bucket: Bucket) -> bool {
        self.destinations.contains_key(&bucket)
    }
}
