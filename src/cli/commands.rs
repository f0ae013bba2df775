use crate::app::{AppContext, Result};
use crate::config::normalize_group;
use crate::domain::Job;
use crate::pipeline::RunReport;
use crate::store::{RunLock, SeenStore};

/// Poll one group. Job and delivery failures never fail the command.
///
/// Returns `None` when nothing ran: no searches in the group, another run
/// holding the store's lock, or a failed save.
pub async fn run_group(ctx: &AppContext, group: &str) -> Result<Option<RunReport>> {
    if let Some(e) = &ctx.config_error {
        println!("Could not load configuration ({}), continuing with none", e);
    }

    let group = normalize_group(group);
    let jobs = ctx.config.jobs_for(&group);

    if jobs.is_empty() {
        println!("Group {} has 0 searches.", group);
        return Ok(None);
    }

    let Some(_lock) = RunLock::acquire(ctx.store.lock_path())? else {
        println!(
            "Another run is using {}, skipping group {}",
            ctx.store.path().display(),
            group
        );
        return Ok(None);
    };

    tracing::info!("Polling {} searches in group {}", jobs.len(), group);

    match ctx.pipeline.run_with_store(jobs, &ctx.store).await {
        Ok(report) => {
            println!("Group {}: {} new items", group, report.new_entries());
            Ok(Some(report))
        }
        Err(e) => {
            tracing::error!("Failed to save {}: {}", ctx.store.path().display(), e);
            eprintln!("Group {}: could not save seen listings: {}", group, e);
            Ok(None)
        }
    }
}

pub fn list_jobs(ctx: &AppContext, group: Option<&str>) -> Result<()> {
    let groups: Vec<String> = match group {
        Some(g) => vec![normalize_group(g)],
        None => ctx.config.group_names().map(normalize_group).collect(),
    };

    if groups.is_empty() {
        println!("No search groups configured");
        return Ok(());
    }

    for name in groups {
        let jobs = ctx.config.jobs_for(&name);
        println!("[{}] {} searches", name, jobs.len());
        for job in jobs {
            println!("  {}", describe_job(ctx, job));
        }
    }

    Ok(())
}

fn describe_job(ctx: &AppContext, job: &Job) -> String {
    let bucket = job.resolved_bucket();
    let router = ctx.pipeline.router();
    let delivery = if router.is_configured(bucket) {
        "webhook"
    } else if router.route_bucket(bucket).is_some() {
        "default webhook"
    } else {
        "no webhook"
    };

    format!("{:<3} {:<30} -> {} ({})", job.site, job.query, bucket, delivery)
}

pub fn show_seen(ctx: &AppContext) -> Result<()> {
    let seen = ctx.store.load();
    println!("{} seen listings in {}", seen.len(), ctx.store.path().display());
    Ok(())
}
