//! Nine Experiments CLI - track progress through the nine three-day experiments.

mod render;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use ninex_core::{catalog, ExperimentId};
use ninex_progress::{Celebration, DayPolicy, ProgressFacade, ProgressStore, StoreConfig};
use ninex_storage::JsonStorage;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ninex")]
#[command(about = "Track progress through nine three-day self-experiments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the progress document
    #[arg(short, long, default_value = ".ninex")]
    storage: std::path::PathBuf,

    /// Storage key of the progress document
    #[arg(long, default_value = ninex_progress::config::DEFAULT_STORAGE_KEY)]
    key: String,

    /// How to treat day numbers outside 1-3 (strict or lenient)
    #[arg(long, default_value = "strict")]
    day_policy: DayPolicy,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall progress
    Status,
    /// List all experiments
    List,
    /// Show experiment details
    Show {
        /// Experiment ID (1-9)
        id: ExperimentId,
    },
    /// Start an available experiment
    Start {
        /// Experiment ID (1-9)
        id: ExperimentId,
    },
    /// Mark a day as done
    Complete {
        /// Experiment ID (1-9)
        id: ExperimentId,
        /// Day (1-3)
        day: u32,
    },
    /// Save a note for a day
    Note {
        /// Experiment ID (1-9)
        id: ExperimentId,
        /// Day (1-3)
        day: u32,
        /// Note text
        text: String,
    },
    /// Show the next experiment to work on
    Next,
    /// Discard all progress
    Reset,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let storage = JsonStorage::new(&cli.storage).await?;
    let config = StoreConfig::default()
        .with_storage_key(cli.key)
        .with_day_policy(cli.day_policy);
    let store = ProgressStore::new(storage).with_config(config);
    let mut facade = ProgressFacade::open(store).await;
    info!(storage = %cli.storage.display(), "opened progress");

    match cli.command {
        Commands::Status => {
            print!("{}", render::overview(facade.snapshot()));
        }
        Commands::List => {
            print!("{}", render::experiment_list(facade.snapshot()));
        }
        Commands::Show { id } => {
            let Some(experiment) = catalog::experiment(id) else {
                bail!("No experiment with ID {}", id);
            };
            print!("{}", render::experiment_detail(experiment, facade.experiment_progress(id)));
        }
        Commands::Start { id } => {
            let before = facade.snapshot().clone();
            let after = facade.start_experiment(id).await;
            print!("{}", render::start_result(&before, after, id));
        }
        Commands::Complete { id, day } => {
            let before = facade.snapshot().clone();
            let after = facade.complete_day(id, day).await;
            print!("{}", render::day_result(&before, after, id, day));
            if let Some(celebration) = Celebration::detect(&before, after, id) {
                print!("{}", render::celebration(&celebration));
            }
        }
        Commands::Note { id, day, text } => {
            let state = facade.add_note(id, day, text).await;
            match state.slot(id) {
                Some(_) => println!("Saved note for experiment {} day {}", id, day),
                None => println!("No experiment with ID {}", id),
            }
        }
        Commands::Next => {
            let completed = facade.snapshot().completed_ids();
            match catalog::next_available_experiment(&completed) {
                Some(experiment) => {
                    print!("{}", render::experiment_detail(experiment, facade.experiment_progress(experiment.id)));
                }
                None => println!("All experiments completed"),
            }
        }
        Commands::Reset => {
            facade.reset().await;
            println!("Progress reset");
        }
    }

    Ok(())
}
