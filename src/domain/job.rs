use serde::{Deserialize, Serialize};

use crate::domain::Bucket;

/// One configured search: a query on a site, routed to a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub site: String,
    pub query: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

fn default_bucket() -> String {
    Bucket::General.label().to_string()
}

impl Job {
    pub fn new(site: impl Into<String>, query: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            query: query.into(),
            bucket: bucket.into(),
        }
    }

    pub fn resolved_bucket(&self) -> Bucket {
        Bucket::resolve(&self.bucket)
    }
}
