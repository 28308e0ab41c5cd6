#[cfg(feature = "native")]
use clap::{Parser, Subcommand};
#[cfg(feature = "native")]
use color_eyre::eyre::{WrapErr, eyre};
#[cfg(feature = "native")]
use jiff::civil::Date;
#[cfg(feature = "native")]
use plantao::platform::NativeStorage;
#[cfg(feature = "native")]
use plantao::{AppConfig, ImportBatch, Planner, init_logging, render};
#[cfg(feature = "native")]
use plantao_core::YearMonth;
#[cfg(feature = "native")]
use plantao_core::model::{OccurrenceId, ShiftId, StatusAction};
#[cfg(feature = "native")]
use std::path::PathBuf;

#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "plantao")]
#[command(about = "Income projection for shift-working doctors")]
struct Args {
    /// Path to the data directory (default: ~/.plantao/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error); overrides config.yaml
    #[arg(short, long)]
    log_level: Option<String>,

    /// Use this date (YYYY-MM-DD) instead of the system clock
    #[arg(long)]
    today: Option<Date>,

    #[command(subcommand)]
    command: Command,
}

#[cfg(feature = "native")]
#[derive(Subcommand, Debug)]
enum Command {
    /// Income expected in a month, by payment date
    Report {
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
    /// Progress towards the monthly goal
    Goal {
        /// Set a new monthly goal in reais
        #[arg(long)]
        set: Option<f64>,
    },
    /// Shifts in the current week
    Week,
    /// Shifts worked in a month, with planned/completed tallies
    Calendar {
        /// Month as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
    /// Change the work or payment status of one occurrence
    Mark {
        /// Occurrence id, as printed by `report`, `week` or `calendar`
        id: String,
        /// completed, missed, reset, received or pending
        action: StatusAction,
    },
    /// Add shifts, an estimate and a goal from a YAML file
    Import { file: PathBuf },
    /// Remove a fixed shift definition
    RemoveShift { id: String },
    /// Delete every stored document
    Clear,
}

#[cfg(feature = "native")]
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(NativeStorage::default_path);
    let config = AppConfig::load_or_default(&data_dir);
    let level = args.log_level.as_deref().unwrap_or(&config.log_level);

    init_logging(&data_dir, level)?;

    let today = args.today.unwrap_or_else(plantao::today);
    let planner = Planner::new(NativeStorage::new(data_dir), &config);
    tracing::debug!(%today, command = ?args.command, "Running command");

    match args.command {
        Command::Report { month } => {
            let month = month.unwrap_or_else(|| YearMonth::of(today));
            let report = planner.monthly_report(month, today)?;
            print!("{}", render::monthly_report(&report, today));
        }
        Command::Goal { set } => {
            if let Some(goal) = set {
                if !goal.is_finite() || goal < 0.0 {
                    return Err(eyre!("goal must be a non-negative amount"));
                }
                planner.set_monthly_goal(goal)?;
            }
            let progress = planner.goal_progress(today)?;
            print!("{}", render::goal_progress(&progress));
        }
        Command::Week => {
            let week = planner.week_view(today)?;
            print!("{}", render::week_view(&week));
        }
        Command::Calendar { month } => {
            let month = month.unwrap_or_else(|| YearMonth::of(today));
            let calendar = planner.calendar_month(month)?;
            print!("{}", render::calendar_month(&calendar));
        }
        Command::Mark { id, action } => {
            planner.set_status(OccurrenceId::from_raw(id), action)?;
            println!("Status atualizado.");
        }
        Command::Import { file } => {
            let content = std::fs::read_to_string(&file)
                .wrap_err_with(|| format!("failed to read {}", file.display()))?;
            let summary = ImportBatch::from_yaml(&content)?.apply(&planner)?;
            println!(
                "Importados: {} plantão(ões) fixo(s), {} avulso(s){}{}",
                summary.fixed_shifts,
                summary.sporadic_shifts,
                if summary.estimate { ", estimativa" } else { "" },
                if summary.goal { ", meta" } else { "" },
            );
        }
        Command::RemoveShift { id } => {
            let removed = planner.remove_fixed_shift(&ShiftId(id))?;
            println!("Plantão removido: {}", removed.hospital);
        }
        Command::Clear => {
            let removed = planner.clear_all()?;
            println!("{removed} documento(s) removido(s).");
        }
    }

    tracing::info!("Command finished");
    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    // Web entry point is handled via wasm_bindgen in lib.rs
    // This main() exists only to satisfy the binary target requirement
    panic!("This binary requires the 'native' feature. For web, build the WASM target.");
}
