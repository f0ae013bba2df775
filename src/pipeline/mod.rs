//! Dedupe-and-dispatch: one sequential pass over a group's jobs.
//!
//! For each job the feed is fetched and normalized, entries whose identity key
//! is in the snapshot loaded at the start of the run are dropped, and every
//! remaining entry is classified, turned into a [`Notification`] and handed to
//! the routed destination. Keys recorded earlier in the same run do not
//! suppress later entries. Keys are recorded before delivery, so a failing
//! webhook never causes the same listing to be re-sent on the next run.

use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::app::Result;
use crate::classifier::{extract_format, extract_price};
use crate::config::PollConfig;
use crate::domain::{Bucket, Entry, Job, Notification, SeenSet, Site};
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;
use crate::notify::Notifier;
use crate::router::Router;
use crate::store::SeenStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub max_entries_per_job: usize,
    pub jitter_min: Duration,
    pub jitter_max: Duration,
    pub shuffle: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&PollConfig::default())
    }
}

impl From<&PollConfig> for PipelineOptions {
    fn from(poll: &PollConfig) -> Self {
        let (jitter_min, jitter_max) = poll.jitter_range();
        Self {
            max_entries_per_job: poll.max_entries_per_job,
            jitter_min,
            jitter_max,
            shuffle: poll.shuffle,
        }
    }
}

impl PipelineOptions {
    pub fn without_jitter(mut self) -> Self {
        self.jitter_min = Duration::ZERO;
        self.jitter_max = Duration::ZERO;
        self
    }

    fn sample_jitter(&self) -> Duration {
        let min = self.jitter_min.as_millis() as u64;
        let max = self.jitter_max.as_millis() as u64;
        if max <= min {
            return Duration::from_millis(min);
        }
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Keys first observed during this run
    pub new_keys: SeenSet,
    accepted: usize,
    pub jobs_processed: usize,
    /// Jobs dropped for an unknown site code
    pub jobs_skipped: usize,
    pub fetch_failures: usize,
    pub delivered: usize,
    pub delivery_failures: usize,
    /// Notifications with no configured destination
    pub undeliverable: usize,
}

impl RunReport {
    /// Entries not in the start-of-run snapshot, counting repeats within the run.
    pub fn new_entries(&self) -> usize {
        self.accepted
    }
}

pub struct Pipeline {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    notifier: Arc<dyn Notifier + Send + Sync>,
    normalizer: Normalizer,
    router: Router,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
        router: Router,
        options: PipelineOptions,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            normalizer: Normalizer::new(),
            router,
            options,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Load the snapshot, run every job, then save `snapshot ∪ new keys`.
    ///
    /// An empty job list returns at once without touching the store.
    pub async fn run_with_store<S>(&self, jobs: &[Job], store: &S) -> Result<RunReport>
    where
        S: SeenStore + ?Sized,
    {
        if jobs.is_empty() {
            return Ok(RunReport::default());
        }

        let snapshot = store.load();
        let report = self.run(jobs, &snapshot).await;
        store.save(&snapshot.merged(&report.new_keys))?;

        Ok(report)
    }

    /// Run every job against a fixed snapshot of seen keys.
    pub async fn run(&self, jobs: &[Job], snapshot: &SeenSet) -> RunReport {
        let mut order: Vec<&Job> = jobs.iter().collect();
        if self.options.shuffle {
            order.shuffle(&mut rand::rng());
        }

        let mut report = RunReport::default();

        for (i, job) in order.into_iter().enumerate() {
            if i > 0 {
                let pause = self.options.sample_jitter();
                if !pause.is_zero() {
                    tokio::time::sleep(pause).await;
                }
            }

            self.process_job(job, snapshot, &mut report).await;
        }

        tracing::info!(
            "Run complete: {} new, {} jobs, {} fetch failures, {} delivered, {} delivery failures",
            report.new_entries(),
            report.jobs_processed,
            report.fetch_failures,
            report.delivered,
            report.delivery_failures
        );

        report
    }

    async fn process_job(&self, job: &Job, snapshot: &SeenSet, report: &mut RunReport) {
        let site = match job.site.parse::<Site>() {
            Ok(site) => site,
            Err(e) => {
                tracing::warn!("{} (skipping '{}')", e, job.query);
                report.jobs_skipped += 1;
                return;
            }
        };
        let bucket = job.resolved_bucket();

        let entries = match self.fetch_entries(site, &job.query).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Fetch failed: {} '{}' ({})", site, job.query, e);
                report.fetch_failures += 1;
                return;
            }
        };
        report.jobs_processed += 1;

        let mut new_for_job = 0;
        for entry in entries.iter().take(self.options.max_entries_per_job) {
            let key = entry.identity_key(site.code(), &job.query);
            if snapshot.contains(&key) {
                continue;
            }
            report.new_keys.insert(key);
            report.accepted += 1;
            new_for_job += 1;

            let notification = build_notification(entry, site, &job.query, bucket);
            self.dispatch(&notification, report).await;
        }

        if new_for_job > 0 {
            tracing::info!("{} '{}': {} new items", site, job.query, new_for_job);
        } else {
            tracing::debug!("{} '{}': nothing new", site, job.query);
        }
    }

    async fn fetch_entries(&self, site: Site, query: &str) -> Result<Vec<Entry>> {
        let url = site.feed_url(query)?;
        let body = self.fetcher.fetch(url.as_str()).await?;
        self.normalizer.normalize(&body)
    }

    async fn dispatch(&self, notification: &Notification, report: &mut RunReport) {
        let Some(destination) = self.router.route_bucket(notification.bucket) else {
            tracing::debug!("No destination for bucket {}, dropping", notification.bucket);
            report.undeliverable += 1;
            return;
        };

        match self.notifier.deliver(destination, notification).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                tracing::warn!("Delivery to {} failed: {}", notification.bucket, e);
                report.delivery_failures += 1;
            }
        }
    }
}

fn build_notification(entry: &Entry, site: Site, query: &str, bucket: Bucket) -> Notification {
    let price = extract_price(&entry.description);
    let listing_type = extract_format(&entry.description, &entry.title);
    Notification::for_entry(entry, site.code(), query, bucket, price, listing_type)
}
