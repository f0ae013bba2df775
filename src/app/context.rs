use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::Result;
use crate::config::{Config, ConfigError};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::notify::{DiscordNotifier, Notifier};
use crate::pipeline::{Pipeline, PipelineOptions};
use crate::router::Router;
use crate::store::JsonSeenStore;

pub struct AppContext {
    pub config: Config,
    pub store: JsonSeenStore,
    pub pipeline: Pipeline,
    /// Set when the config file could not be loaded and defaults are in use
    pub config_error: Option<ConfigError>,
}

impl AppContext {
    /// Build everything from the config file at `config_path`.
    ///
    /// A config file that fails to load is reported through `config_error`
    /// and replaced by an empty configuration.
    pub fn new(config_path: &Path, seen_path: PathBuf) -> Result<Self> {
        let (config, config_error) = match Config::load(config_path) {
            Ok(config) => (config, None),
            Err(e) => {
                tracing::warn!("{}", e);
                let mut config = Config::default();
                config.webhooks.apply_env();
                (config, Some(e))
            }
        };

        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::from_config(&config.poll)?);
        let notifier: Arc<dyn Notifier + Send + Sync> =
            Arc::new(DiscordNotifier::new().with_timeout(config.poll.delivery_timeout()));

        let mut ctx = Self::with_parts(config, JsonSeenStore::new(seen_path), fetcher, notifier);
        ctx.config_error = config_error;
        Ok(ctx)
    }

    /// Wire a context from explicit collaborators.
    pub fn with_parts(
        config: Config,
        store: JsonSeenStore,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        let router = Router::from_config(&config.webhooks);
        let options = PipelineOptions::from(&config.poll);
        let pipeline = Pipeline::new(fetcher, notifier, router, options);

        Self {
            config,
            store,
            pipeline,
            config_error: None,
        }
    }
}
