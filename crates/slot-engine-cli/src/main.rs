//! `slotgen` CLI — validate and materialize recurring presentation schedules.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a schedule request (stdin → "ok" or the first failure)
//! slotgen validate < request.json
//!
//! # Build the booking batch handed to the persistence layer
//! slotgen materialize -i request.json -o batch.json
//!
//! # Expand the batch into one booking per (date, slot) pair
//! slotgen materialize -i request.json --expand
//!
//! # Fill selected days that have no slots with suggestions
//! slotgen materialize -i request.json --suggest
//!
//! # Show the suggested chain for Mondays with 30 + 5 minute slots
//! slotgen suggest --weekday 1 --duration 30 --buffer 5
//!
//! # Rebuild the editing state of a persisted event
//! slotgen seed -i event.json
//!
//! # Print weekday and academic tables (built-in or from a TOML file)
//! slotgen tables --config schedule.toml
//! ```

mod request;

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slot_engine::calendar::{weekday_from_index, weekday_index, ALL_WEEKDAYS};
use slot_engine::config::ScheduleConfig;
use slot_engine::{
    materialize, reconcile_weekdays, seed_from_entries, validate_submission, BookingBatch,
    DaySlotStore, EventConfig, Notice, PersistedEvent,
};
use tracing_subscriber::EnvFilter;

use crate::request::{ScheduleRequest, SeedView, SlotView};

#[derive(Parser)]
#[command(
    name = "slotgen",
    version,
    about = "Recurring presentation slot generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine activity to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a schedule request and print the booking batch
    Materialize {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// TOML file with weekday tables and slot rules
        #[arg(long)]
        config: Option<String>,
        /// Print one booking per (date, slot) pair instead of the batch
        #[arg(long)]
        expand: bool,
        /// Auto-suggest slots for selected days that have none
        #[arg(long)]
        suggest: bool,
    },
    /// Check a schedule request and report the first failure
    Validate {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// TOML file with weekday tables and slot rules
        #[arg(long)]
        config: Option<String>,
        /// Auto-suggest slots for selected days that have none
        #[arg(long)]
        suggest: bool,
    },
    /// Show the auto-suggested slot chain for one weekday
    Suggest {
        /// Weekday index, 0 = Sunday
        #[arg(short, long)]
        weekday: u8,
        /// Presentation length in minutes
        #[arg(short, long)]
        duration: u32,
        /// Gap after each presentation in minutes
        #[arg(short, long, default_value_t = 0)]
        buffer: u32,
        /// TOML file with weekday tables and slot rules
        #[arg(long)]
        config: Option<String>,
    },
    /// Derive the editing state from a persisted event
    Seed {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the weekday and academic lookup tables
    Tables {
        /// TOML file with weekday tables and slot rules
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Materialize {
            input,
            output,
            config,
            expand,
            suggest,
        } => {
            let config = load_config(config.as_deref())?;
            let request = read_request(input.as_deref())?;
            let batch = checked_batch(&request, &config, suggest)?;
            let json = if expand {
                serde_json::to_string_pretty(&batch.bookings())?
            } else {
                serde_json::to_string_pretty(&batch)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Validate {
            input,
            config,
            suggest,
        } => {
            let config = load_config(config.as_deref())?;
            let request = read_request(input.as_deref())?;
            checked_batch(&request, &config, suggest)?;
            println!("ok");
        }
        Commands::Suggest {
            weekday,
            duration,
            buffer,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let day = weekday_from_index(weekday)?;
            let event = EventConfig {
                duration,
                buffer_time: buffer,
                ..EventConfig::default()
            };
            let mut store = DaySlotStore::new();
            store.auto_suggest(day, &event, &config);
            let chain: Vec<SlotView> = store.slots(day).iter().map(SlotView::from).collect();
            println!("{}", serde_json::to_string_pretty(&chain)?);
        }
        Commands::Seed { input } => {
            let raw = read_input(input.as_deref())?;
            let persisted: PersistedEvent =
                serde_json::from_str(&raw).context("Failed to parse persisted event JSON")?;
            let seed = seed_from_entries(&persisted.slots);
            let view = SeedView::new(persisted.id, &seed);
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Tables { config } => {
            let config = load_config(config.as_deref())?;
            print_tables(&config);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<ScheduleConfig> {
    match path {
        Some(path) => ScheduleConfig::load(path)
            .with_context(|| format!("Failed to load configuration: {}", path)),
        None => Ok(ScheduleConfig::default()),
    }
}

fn read_request(path: Option<&str>) -> Result<ScheduleRequest> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse schedule request JSON")
}

/// Reconcile, validate and materialize a request, printing any warnings to
/// stderr. The first validation failure becomes the error.
fn checked_batch(request: &ScheduleRequest, config: &ScheduleConfig, suggest: bool) -> Result<BookingBatch> {
    let (mut range, store) = request.build(config, suggest)?;

    let mut notices: Vec<Notice> = Vec::new();
    reconcile_weekdays(&mut range, config, &mut notices);
    for notice in &notices {
        eprintln!("{}", notice);
    }

    validate_submission(&request.event, &range, &store, config)?;
    let batch = materialize(&request.event, &range, &store)?;
    tracing::info!(
        dates = batch.dates.len(),
        templates = batch.time_slots.len(),
        "materialized booking batch"
    );
    Ok(batch)
}

fn print_tables(config: &ScheduleConfig) {
    println!("Weekdays:");
    for day in ALL_WEEKDAYS {
        let suggested: Vec<String> = config
            .suggested_times(day)
            .iter()
            .map(|t| t.to_string())
            .collect();
        let suggested = if suggested.is_empty() {
            "(no suggestions)".to_string()
        } else {
            suggested.join(", ")
        };
        println!(
            "  {} {:<10} {}",
            weekday_index(day),
            config.label(day),
            suggested
        );
    }

    println!("Schools:");
    for school in &config.schools {
        println!("  {}: {}", school.name, school.departments.join(", "));
    }

    println!("Years: {}", config.years.join(", "));
    println!(
        "Rules: default start {}, late start warning {}, suggestions until {} (max {})",
        config.rules.default_start,
        config.rules.late_start_warning,
        config.rules.suggestion_cutoff,
        config.rules.max_suggested_slots
    );
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
