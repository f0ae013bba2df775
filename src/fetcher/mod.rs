pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

#[async_trait]
pub trait Fetcher {
    /// Raw body of a successful (2xx) response.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
