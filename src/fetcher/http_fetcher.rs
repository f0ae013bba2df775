use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

use crate::app::Result;
use crate::config::PollConfig;
use crate::fetcher::Fetcher;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; listwatch/0.1; rss-monitor)";
const FEED_ACCEPT: &str = "application/rss+xml, application/xml;q=0.9, */*;q=0.8";

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(FEED_ACCEPT));

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(poll: &PollConfig) -> Result<Self> {
        let user_agent = poll.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        Self::new(poll.fetch_timeout(), user_agent)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        let body = response.bytes().await?.to_vec();
        Ok(body)
    }
}
