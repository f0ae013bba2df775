use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use listwatch::app::AppContext;
use listwatch::cli::{commands, Cli, Commands};
use listwatch::watch::{self, Schedule};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    match cli.command {
        Commands::Run { group } => {
            let ctx = AppContext::new(&cli.config, cli.seen)?;
            commands::run_group(&ctx, &group).await?;
        }
        Commands::Jobs { group } => {
            let ctx = AppContext::new(&cli.config, cli.seen)?;
            commands::list_jobs(&ctx, group.as_deref())?;
        }
        Commands::Seen => {
            let ctx = AppContext::new(&cli.config, cli.seen)?;
            commands::show_seen(&ctx)?;
        }
        Commands::Watch {
            group,
            every,
            delay_first,
        } => {
            let schedule = Schedule::new(&group, &every, !delay_first)?;
            let ctx = AppContext::new(&cli.config, cli.seen)?;
            watch::watch(&ctx, &schedule).await?;
        }
    }

    Ok(())
}

/// Log to stdout, and also to `log_file` without colors.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(())
}
