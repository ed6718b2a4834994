//! pagewatch-audit - accessibility audit engine
//!
//! Entry points:
//! - `run-scheduled`: one scheduler pass over every due, enabled page
//!   (invoked from cron or a systemd timer)
//! - `audit --page-id N`: manual run-now action for one page
//! - `add-page`: register a page so there is something to audit

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use pagewatch_audit::db;
use pagewatch_audit::models::{Cadence, Page};
use pagewatch_audit::services::{AuditOrchestrator, PageSpeedClient, RetryPolicy, Scheduler};
use pagewatch_common::config::Config;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pagewatch-audit", about = "Accessibility audit engine", version)]
struct Cli {
    /// SQLite database path (overrides config and environment)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Audit every enabled page that is due per its cadence
    RunScheduled,

    /// Run one audit for a single page now
    Audit {
        #[arg(long)]
        page_id: i64,
    },

    /// Register a page for auditing
    AddPage {
        #[arg(long)]
        url: String,

        /// daily, weekly, biweekly, or monthly
        #[arg(long, default_value = "weekly")]
        cadence: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.db_path.as_deref())?;
    info!("Starting pagewatch-audit");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", config.database_path.display());

    let pool = pagewatch_common::db::init_database(&config.database_path).await?;

    match cli.command {
        Command::RunScheduled => {
            let client = PageSpeedClient::new(config.pagespeed.api_key.clone())?;
            let orchestrator = AuditOrchestrator::new(
                pool.clone(),
                client,
                RetryPolicy::from_config(&config.pagespeed),
            );
            let scheduler = Scheduler::new(pool.clone(), orchestrator);

            let audits = scheduler.run().await?;
            for audit in &audits {
                println!(
                    "page {} -> {} (score {}, retries {})",
                    audit.page_id,
                    audit.status.label(),
                    audit.score.value(),
                    audit.retry_count
                );
            }
            info!(count = audits.len(), "Scheduled audit pass finished");
        }

        Command::Audit { page_id } => {
            let client = PageSpeedClient::new(config.pagespeed.api_key.clone())?;
            let orchestrator = AuditOrchestrator::new(
                pool.clone(),
                client,
                RetryPolicy::from_config(&config.pagespeed),
            );

            let audit = orchestrator.run_audit(page_id).await?;
            println!(
                "audit {} -> {} (score {}, grade {})",
                audit.id.unwrap_or_default(),
                audit.status.label(),
                audit.score.value(),
                audit.score.grade()
            );
            if let Some(message) = &audit.error_message {
                println!("error: {message}");
            }
        }

        Command::AddPage { url, cadence } => {
            let cadence: Cadence = cadence.parse()?;
            let mut page = Page::new(url, cadence, Utc::now());
            db::save_page(&pool, &mut page).await?;
            println!(
                "added page {} ({}, {})",
                page.id.unwrap_or_default(),
                page.url,
                page.cadence.label()
            );
        }
    }

    Ok(())
}
