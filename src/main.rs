//! Check-in desk CLI.
//!
//! # Usage
//!
//! ```bash
//! checkin event "Lançamento Tera"
//! checkin import convidados.xlsx
//! checkin check-in 3
//! checkin walk-in add -n "Ana Souza" -p 11999990000
//! checkin report --out relatorio_final.xlsx
//! CHECKIN_SYNC_URL=https://... checkin sync
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use checkin::{
    config::AppConfig,
    core::store::RosterStore,
    persist::sqlite::SqliteKv,
    runtime::handle::{RosterHandle, RuntimeConfig, spawn_roster},
};

#[derive(Parser)]
#[command(name = "checkin")]
#[command(author, version, about = "Event check-in roster")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the event name
    Event {
        /// Event name, stored as typed
        name: String,
    },
    /// Replace the invited list with the rows of an .xlsx file
    Import {
        /// Spreadsheet with `nome` and `telefone` columns
        file: PathBuf,
    },
    /// List invited guests and walk-ins with their positions
    List,
    /// Show confirmed / present / walk-in counts
    Status,
    /// Mark an invited guest present
    CheckIn {
        /// Position in the invited list
        index: usize,
    },
    /// Manage walk-in visitors
    WalkIn {
        #[command(subcommand)]
        action: WalkInAction,
    },
    /// Write the attendance report workbook
    Report {
        /// Output path (defaults to CHECKIN_REPORT_PATH)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Push the roster to the remote append endpoint
    Sync,
}

#[derive(Subcommand)]
enum WalkInAction {
    /// Add a walk-in visitor
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        phone: String,
    },
    /// Overwrite a walk-in visitor
    Edit {
        /// Position in the walk-in list
        index: usize,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        phone: String,
    },
    /// Remove a walk-in visitor
    Remove {
        /// Position in the walk-in list
        index: usize,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let store = RosterStore::open(SqliteKv::open(&config.db_path)?)?;
    let handle = spawn_roster(store, RuntimeConfig::default());

    let result = dispatch(&handle, &config, cli.command).await;
    handle.shutdown().await?;
    result
}

async fn dispatch(handle: &RosterHandle, config: &AppConfig, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Event { name } => {
            handle.set_event_name(name).await?;
        }
        Commands::Import { file } => {
            let bytes = tokio::fs::read(&file).await?;
            handle.import_xlsx(bytes).await?;
            let summary = handle.summary().await?;
            println!("Confirmados: {}", summary.confirmed);
        }
        Commands::List => {
            let snapshot = handle.snapshot().await?;
            for (i, guest) in snapshot.invited.iter().enumerate() {
                let mark = if guest.present { "x" } else { " " };
                let by = if guest.invited_by.is_empty() {
                    String::new()
                } else {
                    format!(" (convidado por {})", guest.invited_by)
                };
                println!("{i:>4} [{mark}] {} - {}{by}", guest.name, guest.phone);
            }
            if !snapshot.walk_ins.is_empty() {
                println!("Visitantes não listados:");
                for (i, visitor) in snapshot.walk_ins.iter().enumerate() {
                    println!("{i:>4} {} - {}", visitor.name, visitor.phone);
                }
            }
        }
        Commands::Status => {
            let summary = handle.summary().await?;
            println!("Confirmados: {}", summary.confirmed);
            println!("Presentes: {}", summary.present);
            println!("Visitantes: {}", summary.walk_ins);
        }
        Commands::CheckIn { index } => {
            if handle.check_in(index).await?.is_none() {
                println!("Nothing to do for guest {index}");
            }
        }
        Commands::WalkIn { action } => match action {
            WalkInAction::Add { name, phone } => {
                if handle.add_or_save_walk_in(name, phone).await?.is_none() {
                    println!("Name and phone are required");
                }
            }
            WalkInAction::Edit { index, name, phone } => {
                if handle.begin_edit_walk_in(index).await?.is_none() {
                    println!("No walk-in at {index}");
                    return Ok(());
                }
                handle.stage(name, phone).await?;
                if handle.save_staged_walk_in().await?.is_none() {
                    println!("Name and phone are required");
                }
            }
            WalkInAction::Remove { index } => {
                if handle.remove_walk_in(index).await?.is_none() {
                    println!("No walk-in at {index}");
                }
            }
        },
        Commands::Report { out } => {
            let path = out.unwrap_or_else(|| config.report_path.clone());
            let bytes = handle.report().await?.to_xlsx()?;
            tokio::fs::write(&path, bytes).await?;
            println!("Report written to {}", path.display());
        }
        Commands::Sync => {
            let endpoint = config.sync_endpoint()?;
            let rows = handle.sync(&endpoint).await?;
            println!("Synced {rows} rows");
        }
    }
    Ok(())
}
