//! # listwatch
//!
//! Polls marketplace search feeds and posts each newly listed item to a
//! Discord channel chosen by the search's bucket.
//!
//! ## Architecture
//!
//! ```text
//! Config → Jobs → Fetcher → Normalizer → Identity/Seen filter → Classifier → Router → Notifier
//!                                                  ↓
//!                                            Seen store
//! ```
//!
//! - [`fetcher`]: HTTP client for search feeds
//! - [`normalizer`]: Converts RSS/Atom feeds to fixed [`Entry`](domain::Entry) records
//! - [`pipeline`]: Dedupe-and-dispatch over one group of searches
//! - [`store`]: Seen-set persistence
//!
//! ## Quick Start
//!
//! ```bash
//! # Poll group A once
//! GROUP=A DISCORD_WEBHOOK_GENERAL=https://discord.com/api/webhooks/... listwatch run
//!
//! # Show configured searches
//! listwatch jobs
//!
//! # Poll every 15 minutes
//! listwatch watch --every 15m --log-file listwatch.log
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config, store
/// and pipeline.
pub mod app;

/// Best-effort price and listing-type extraction.
pub mod classifier;

/// Command-line interface using clap.
///
/// - `run [--group G]` - Poll a group once
/// - `jobs [GROUP]` - List configured searches
/// - `seen` - Count seen listings
/// - `watch [--every 15m]` - Repeated runs
pub mod cli;

/// Search groups, webhooks and polling settings.
///
/// Loads from `config/searches.json` (or TOML), overlaid with
/// `DISCORD_WEBHOOK_*` environment variables.
pub mod config;

/// Core domain models.
///
/// - [`Job`](domain::Job): One configured search
/// - [`Entry`](domain::Entry): Normalized feed item
/// - [`IdentityKey`](domain::IdentityKey): SHA256 dedupe key
/// - [`SeenSet`](domain::SeenSet): Keys already processed
/// - [`Notification`](domain::Notification): Routed message payload
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Feed parsing and normalization.
pub mod normalizer;

/// Notification delivery.
///
/// - [`Notifier`](notify::Notifier): Async delivery trait
/// - [`DiscordNotifier`](notify::DiscordNotifier): Discord webhook embeds
pub mod notify;

/// Dedupe-and-dispatch pipeline.
pub mod pipeline;

/// Bucket to destination routing.
pub mod router;

/// Seen-set persistence.
///
/// - [`SeenStore`](store::SeenStore): Trait defining load/save
/// - [`JsonSeenStore`](store::JsonSeenStore): JSON file implementation
/// - [`RunLock`](store::RunLock): One run per store at a time
pub mod store;

/// Foreground scheduler for repeated runs.
pub mod watch;
