// SPDX-License-Identifier: GPL-3.0-or-later
mod output;
mod prompt;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use archivist_application::{AppState, DeduplicationService};
use archivist_config::{load as load_config, AppConfig};
use archivist_domain::Report;
use archivist_infrastructure::{open_catalogue, CatalogueAccess, CatalogueStore, SqliteCatalogueStore};
use clap::Parser;
use prompt::{confirm, Confirmation};
use tracing::{info, warn};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

#[derive(Parser, Debug)]
#[command(
    name = "archivist",
    about = "Find and remove duplicate catalogue records",
    version,
    long_about = None
)]
struct Cli {
    /// Print the decisions without changing anything.
    #[arg(long)]
    dry_run: bool,

    /// Delete without asking for confirmation.
    #[arg(long)]
    force: bool,

    /// Print the final report as JSON.
    #[arg(long)]
    json: bool,

    /// Only resolve duplicates inside this category.
    #[arg(long)]
    category: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database URL, overrides `database.url`.
    #[arg(long)]
    database_url: Option<String>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Some(category) = &self.category {
            config.dedup.category = Some(category.clone());
        }
        if self.force {
            config.dedup.require_confirmation = false;
        }
    }
}

/// Streams a run reads answers from and writes the report to.
struct Console<'a, R, W, E> {
    input: &'a mut R,
    interactive: bool,
    out: &'a mut W,
    err: &'a mut E,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter_handle = init_tracing();

    let mut config = load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    if let Some(handle) = filter_handle {
        handle.reload(EnvFilter::new(&config.telemetry.log_level))?;
    }

    let state = AppState::new(config.clone());
    state.on_start();

    let access = if cli.dry_run {
        CatalogueAccess::ReadOnly
    } else {
        CatalogueAccess::ReadWrite
    };
    let pool = open_catalogue(&config, access).await?;
    let store: Arc<dyn CatalogueStore> = Arc::new(SqliteCatalogueStore::new(pool));
    let service = state.dedup_service(store);

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let mut err = io::stderr();
    let console = Console {
        input: &mut input,
        interactive,
        out: &mut out,
        err: &mut err,
    };
    run(&cli, &config, &service, console).await?;

    Ok(())
}

/// Plan, confirm and apply (or just report). `None` when the user cancelled.
async fn run<R: BufRead, W: Write, E: Write>(
    cli: &Cli,
    config: &AppConfig,
    service: &DeduplicationService,
    console: Console<'_, R, W, E>,
) -> Result<Option<Report>> {
    let plan = service.plan().await?;
    if !cli.json {
        output::write_decisions(console.out, &plan.decisions)?;
    }

    let report = if cli.dry_run {
        service.report(plan)
    } else {
        if !plan.is_empty() && config.dedup.require_confirmation {
            let answer = confirm(
                console.input,
                console.err,
                console.interactive,
                plan.total_discarded(),
            )?;
            match answer {
                Confirmation::Proceed => {}
                Confirmation::NonInteractive => {
                    warn!(target: "cli", "no interactive input available, proceeding without confirmation");
                }
                Confirmation::Cancelled => {
                    info!(target: "cli", "cancelled, no changes made");
                    writeln!(console.out, "Cancelled")?;
                    return Ok(None);
                }
            }
        }
        service.apply(plan).await
    };

    if cli.json {
        output::write_json(console.out, &report)?;
    } else {
        output::write_summary(console.out, &report)?;
    }

    Ok(Some(report))
}

/// Install the subscriber before anything logs. When `RUST_LOG` is unset the
/// returned handle swaps in the configured level once config is loaded.
fn init_tracing() -> Option<reload::Handle<EnvFilter, Registry>> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr);
    let from_env = EnvFilter::try_from_default_env().ok();
    let configurable = from_env.is_none();
    let (env_filter, handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("info")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    configurable.then_some(handle)
}
