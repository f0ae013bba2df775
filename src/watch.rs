//! Repeats group runs on a fixed period until SIGINT or SIGTERM.
//!
//! Each run goes through [`commands::run_group`], so it takes the seen store's
//! lock like a one-shot `run`. A signal that arrives mid-run takes effect once
//! that run has saved its keys.

use std::time::{Duration, Instant};

use tokio::time::{interval, MissedTickBehavior};

use crate::app::{AppContext, ListwatchError, Result};
use crate::cli::commands;
use crate::config::normalize_group;

pub const DEFAULT_PERIOD: &str = "15m";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub group: String,
    pub period: Duration,
    /// Start with a run instead of waiting one period
    pub run_immediately: bool,
}

impl Schedule {
    pub fn new(group: &str, period: &str, run_immediately: bool) -> Result<Self> {
        Ok(Self {
            group: normalize_group(group),
            period: parse_period(period)?,
            run_immediately,
        })
    }
}

/// Parse `90`, `90s`, `15m`, `2h` or `1d`. Zero is rejected.
pub fn parse_period(text: &str) -> Result<Duration> {
    let text = text.trim();
    let invalid = || ListwatchError::Config(format!("invalid period '{}', expected e.g. 15m", text));

    let split = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    let (count, unit) = text.split_at(split);
    let count: u64 = count.parse().map_err(|_| invalid())?;
    let unit_secs = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        _ => return Err(invalid()),
    };

    match count.checked_mul(unit_secs) {
        Some(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(invalid()),
    }
}

pub async fn watch(ctx: &AppContext, schedule: &Schedule) -> Result<()> {
    tracing::info!(
        group = %schedule.group,
        period_secs = schedule.period.as_secs(),
        pid = std::process::id(),
        "Watching"
    );

    let mut ticker = interval(schedule.period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    if !schedule.run_immediately {
        ticker.tick().await;
    }

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        let started = Instant::now();
        match commands::run_group(ctx, &schedule.group).await? {
            Some(report) => tracing::info!(
                group = %schedule.group,
                new = report.new_entries(),
                fetch_failures = report.fetch_failures,
                delivery_failures = report.delivery_failures,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Run finished"
            ),
            None => tracing::info!(group = %schedule.group, "Nothing ran"),
        }
    }

    tracing::info!("Stopped watching group {}", schedule.group);
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!("No SIGTERM handler ({}), only Ctrl-C stops the watch", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("No Ctrl-C handler either: {}", e);
                std::future::pending::<()>().await;
            }
            return;
        }
    };

    tokio::select! {
        _ = terminate.recv() => {}
        _ = tokio::signal::ctrl_c() => {}
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("No Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
