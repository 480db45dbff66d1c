use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use regatta_cli::{Config, JsonStore, ResultStore, export, find_event, template};
use scoring::ResultLedger;
use scoring::dto::{ResultEdit, ResultSubmission};
use scoring::filter::refine;
use scoring::models::Event;
use scoring::services::{class_standings, group_results, overall_standings};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "regatta")]
#[command(about = "Sailing regatta results and series scoring", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "REGATTA_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    #[arg(long, env = "REGATTA_EVENTS_FILE", default_value = "events.json")]
    events_file: PathBuf,

    #[arg(long, env = "REGATTA_RESULTS_FILE", default_value = "results.json")]
    results_file: PathBuf,

    /// Name recorded in the upload and amendment audit fields
    #[arg(long, env = "REGATTA_USER", default_value = "race-officer")]
    user: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add results from a JSON file holding one submission or an array of them
    Submit {
        #[arg(long)]
        event: String,

        file: PathBuf,

        /// Race every entry belongs to, overriding the entries' own race ids
        #[arg(long)]
        race: Option<String>,
    },
    /// Replace a result's details from a JSON file
    Edit {
        #[arg(long)]
        event: String,

        #[arg(long)]
        id: String,

        file: PathBuf,
    },
    Delete {
        #[arg(long)]
        event: String,

        #[arg(long)]
        id: String,
    },
    /// Recompute positions and points for every race of an event
    Rescore {
        #[arg(long)]
        event: String,
    },
    /// Print results grouped by handicap system and class
    Results {
        #[arg(long)]
        event: String,

        /// e.g. "Laser > 1000 PY" or "Laser between 1000 and 1200 PY"
        #[arg(long)]
        filter: Option<String>,
    },
    Standings {
        #[arg(long)]
        event: String,
    },
    ClassStandings {
        #[arg(long)]
        event: String,
    },
    ExportCsv {
        #[arg(long)]
        event: String,

        #[arg(long)]
        output: Option<PathBuf>,
    },
    ExportJson {
        #[arg(long)]
        event: String,

        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a sample bulk-submission file
    Template {
        #[arg(long)]
        event: String,

        #[arg(long)]
        race: Option<String>,

        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "regatta={},regatta_cli={},scoring={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::new(&cli.data_dir, &cli.events_file, &cli.results_file);
    let store = JsonStore::new(&config);

    let events = store
        .load_events()
        .await
        .with_context(|| format!("Cannot load events from {}", config.events_path.display()))?
        .data;

    match cli.command {
        Commands::Submit { event, file, race } => {
            let event = find_event(&events, &event)?;
            handle_submit(&store, event, &file, race.as_deref(), &cli.user).await?;
        }
        Commands::Edit { event, id, file } => {
            let event = find_event(&events, &event)?;
            handle_edit(&store, event, &id, &file, &cli.user).await?;
        }
        Commands::Delete { event, id } => {
            let event = find_event(&events, &event)?;
            handle_delete(&store, event, &id).await?;
        }
        Commands::Rescore { event } => {
            let event = find_event(&events, &event)?;
            handle_rescore(&store, event).await?;
        }
        Commands::Results { event, filter } => {
            let event = find_event(&events, &event)?;
            let results = store.load_results().await?.data;
            let grouped = refine(group_results(event, &results), filter.as_deref());
            print_json(&grouped)?;
        }
        Commands::Standings { event } => {
            let event = find_event(&events, &event)?;
            let results = store.load_results().await?.data;
            print_json(&overall_standings(event, &results))?;
        }
        Commands::ClassStandings { event } => {
            let event = find_event(&events, &event)?;
            let results = store.load_results().await?.data;
            print_json(&class_standings(event, &results))?;
        }
        Commands::ExportCsv { event, output } => {
            let event = find_event(&events, &event)?;
            let results = store.load_results().await?.data;
            tracing::info!(
                "Exporting {} result(s) for event {}",
                export::event_results(event, &results).len(),
                event.id
            );
            emit(output.as_deref(), export::to_csv(event, &results)).await?;
        }
        Commands::ExportJson { event, output } => {
            let event = find_event(&events, &event)?;
            let results = store.load_results().await?.data;
            emit(output.as_deref(), export::to_json(event, &results)?).await?;
        }
        Commands::Template {
            event,
            race,
            output,
        } => {
            let event = find_event(&events, &event)?;
            let samples = template::submission_template(event, race.as_deref())?;
            emit(output.as_deref(), serde_json::to_string_pretty(&samples)?).await?;
        }
    }

    Ok(())
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum SubmissionFile {
    Many(Vec<ResultSubmission>),
    One(ResultSubmission),
}

async fn handle_submit(
    store: &JsonStore,
    event: &Event,
    file: &Path,
    race: Option<&str>,
    user: &str,
) -> Result<()> {
    tracing::info!("Loading submissions from: {}", file.display());
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Cannot read {}", file.display()))?;
    let submissions: SubmissionFile = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid submission file", file.display()))?;

    let snapshot = store.load_results().await?;
    let mut ledger = ResultLedger::new(snapshot.data);

    match submissions {
        SubmissionFile::One(mut submission) => {
            if let Some(race) = race {
                submission.race_id = race.to_string();
            }
            let id = ledger.submit(event, submission, user)?;
            store.save_results(snapshot.last_updated, ledger.into_results()).await?;
            tracing::info!("✓ Created result {}", id);
        }
        SubmissionFile::Many(entries) => {
            let report = ledger.submit_bulk(event, race, entries, user);
            for error in &report.errors {
                tracing::error!("  ✗ {}", error);
            }
            if !report.accepted.is_empty() {
                store.save_results(snapshot.last_updated, ledger.into_results()).await?;
            }
            tracing::info!(
                "Summary: {} accepted, {} rejected",
                report.accepted.len(),
                report.errors.len()
            );
            if !report.is_clean() {
                anyhow::bail!("{} result(s) failed to import", report.errors.len());
            }
        }
    }

    Ok(())
}

async fn handle_edit(
    store: &JsonStore,
    event: &Event,
    id: &str,
    file: &Path,
    user: &str,
) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Cannot read {}", file.display()))?;
    let edit: ResultEdit = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid result edit", file.display()))?;

    let snapshot = store.load_results().await?;
    let mut ledger = ResultLedger::new(snapshot.data);
    ledger.edit(event, id, edit, user)?;
    store.save_results(snapshot.last_updated, ledger.into_results()).await?;

    tracing::info!("✓ Amended result {}", id);
    Ok(())
}

async fn handle_delete(store: &JsonStore, event: &Event, id: &str) -> Result<()> {
    let snapshot = store.load_results().await?;
    let mut ledger = ResultLedger::new(snapshot.data);
    let removed = ledger.delete(event, id)?;
    store.save_results(snapshot.last_updated, ledger.into_results()).await?;

    tracing::info!("✓ Deleted result for {} ({})", removed.sailor_name, removed.sail_number);
    Ok(())
}

async fn handle_rescore(store: &JsonStore, event: &Event) -> Result<()> {
    let snapshot = store.load_results().await?;
    let mut ledger = ResultLedger::new(snapshot.data);
    ledger.rescore_event(event);
    store.save_results(snapshot.last_updated, ledger.into_results()).await?;

    tracing::info!("✓ Rescored {} race(s) of {}", event.races.len(), event.name);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn emit(output: Option<&Path>, content: String) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("Cannot write {}", path.display()))?;
            tracing::info!("Written to: {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
