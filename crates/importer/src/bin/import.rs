use anyhow::Context;
use clap::{Parser, Subcommand};
use importer::{SheetOutcome, find_sheets, process_file};
use std::path::{Path, PathBuf};
use storage::{Database, RecordStore};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "swim-import")]
#[command(about = "Swim meet result sheet importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Not needed with --validate-only
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,

    /// Print the per-file reports as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import one CSV sheet
    File {
        file: PathBuf,

        #[arg(long)]
        validate_only: bool,
    },
    /// Import every CSV sheet in a directory
    Bulk {
        #[arg(long, default_value = "./imports")]
        directory: PathBuf,

        #[arg(long)]
        validate_only: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "swim_import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let (files, validate_only) = match cli.command {
        Commands::File {
            file,
            validate_only,
        } => (vec![file], validate_only),
        Commands::Bulk {
            directory,
            validate_only,
        } => {
            tracing::info!("Scanning directory for result sheets: {}", directory.display());
            let files = find_sheets(&directory).await?;
            if files.is_empty() {
                tracing::warn!("No CSV files found in {}", directory.display());
                return Ok(());
            }
            tracing::info!("Found {} result sheet(s)", files.len());
            (files, validate_only)
        }
    };

    let db = if validate_only {
        None
    } else {
        let database_url = cli
            .database_url
            .as_deref()
            .context("DATABASE_URL is required unless --validate-only is set")?;
        Some(connect(database_url).await?)
    };
    let store = db.as_ref().map(|db| db as &dyn RecordStore);

    let mut outcomes = Vec::new();
    let mut error_count = 0;

    for (idx, file_path) in files.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::warn!("Cancelled, skipping remaining {} file(s)", files.len() - idx);
            break;
        }

        tracing::info!("[{}/{}] Processing: {}", idx + 1, files.len(), file_path.display());

        match process_file(store, file_path, &cancel).await {
            Ok(outcome) => {
                log_outcome(&outcome);
                outcomes.push((file_path.clone(), outcome));
            }
            Err(e) => {
                error_count += 1;
                tracing::error!("  ✗ Error: {}", e);
            }
        }
    }

    let failed_rows: usize = outcomes.iter().map(|(_, o)| o.failed_rows()).sum();
    tracing::info!(
        "Summary: {} file(s) processed, {} failed, {} row(s) rejected",
        outcomes.len(),
        error_count,
        failed_rows
    );

    if cli.json {
        print_json(&outcomes)?;
    }

    if error_count > 0 {
        anyhow::bail!("{} file(s) failed to import", error_count);
    }

    Ok(())
}

async fn connect(database_url: &str) -> anyhow::Result<Database> {
    tracing::info!("Connecting to database...");
    let db = Database::new(database_url, 5)
        .await
        .context("Failed to connect to database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    Ok(db)
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::warn!("Ctrl-C received, stopping after the current row");
        cancel.cancel();
    }
}

fn log_outcome(outcome: &SheetOutcome) {
    match outcome {
        SheetOutcome::Validated(report) => {
            report.log_warnings();
            if report.is_clean() {
                tracing::info!("  ✓ {} row(s) valid", report.rows);
            } else {
                tracing::warn!(
                    "  {} of {} row(s) invalid",
                    report.errors.len(),
                    report.rows
                );
            }
        }
        SheetOutcome::Imported(report) => {
            for error in &report.errors {
                tracing::warn!("  row {}: {}", error.row, error.reason);
            }
            tracing::info!("  ✓ {}", report.message);
        }
    }
}

fn print_json(outcomes: &[(PathBuf, SheetOutcome)]) -> anyhow::Result<()> {
    let reports: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|(path, outcome)| file_report(path, outcome))
        .collect::<Result<_, _>>()?;

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

fn file_report(path: &Path, outcome: &SheetOutcome) -> serde_json::Result<serde_json::Value> {
    Ok(serde_json::json!({
        "file": path.display().to_string(),
        "outcome": serde_json::to_value(outcome)?,
    }))
}
