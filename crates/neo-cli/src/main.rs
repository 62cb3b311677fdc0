//! # neo — Close-Approach Search CLI
//!
//! - `neo query --date <D> | --start-date <S> --end-date <E> [--filter F]...`
//! - `neo stats` — dataset summary as JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neo_io::{Database, LoadReport, Loader};
use neo_query::{NeoSearcher, QueryConfig, QuerySpec};

mod config;
mod output;

use config::Config;
use output::OutputFormat;

/// ☄️ NEO — search near-Earth object close approaches.
#[derive(Parser)]
#[command(name = "neo", version, about, long_about = None)]
struct Cli {
    /// Path to the close-approach dataset (overrides the config file).
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Path to config file
    #[arg(long, global = true, default_value = "neo.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find objects or approaches by date, with optional filters.
    Query {
        /// Exact approach date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,

        /// Inclusive range start, used when --date is absent.
        #[arg(long)]
        start_date: Option<String>,

        /// Inclusive range end, used when --date is absent.
        #[arg(long)]
        end_date: Option<String>,

        /// Filter as field:operator:value (hazardous, diameter, distance; =, >, >=).
        #[arg(long)]
        filter: Vec<String>,

        /// Maximum number of results.
        #[arg(long, allow_negative_numbers = true)]
        number: Option<i64>,

        /// NEO or Path.
        #[arg(long)]
        return_object: Option<String>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Write results to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Report dataset statistics as JSON.
    Stats,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "neo_cli=info,neo_io=info,neo_query=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let data_path = cli.data.unwrap_or_else(|| config.data.path.clone());
    let loader = Loader::new(config.data.loader.clone());
    let (db, report) = match loader.load_path(&data_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: failed to load {}: {}", data_path.display(), e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Query {
            date,
            start_date,
            end_date,
            filter,
            number,
            return_object,
            format,
            out,
        } => {
            let query = QueryConfig {
                date,
                start_date,
                end_date,
                filter,
                number,
                return_object,
            };
            let format = format.unwrap_or(config.output.format);
            if let Err(e) = run_query(&db, &query, format, out) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }

        Commands::Stats => print_stats(&db, &report, &data_path),
    }
}

fn run_query(
    db: &Database,
    query: &QueryConfig,
    format: OutputFormat,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec = QuerySpec::build(query)?;
    let results = NeoSearcher::new(db).get_objects(&spec);

    match out {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            output::render(&results, format, &mut writer)?;
            writer.flush()?;
            tracing::info!("Wrote {} results to {}", results.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            output::render(&results, format, &mut lock)?;
        }
    }
    Ok(())
}

fn print_stats(db: &Database, report: &LoadReport, path: &std::path::Path) {
    let span = db.date_span();
    let hazardous = db
        .neos()
        .iter()
        .filter(|n| n.is_potentially_hazardous)
        .count();

    let status = serde_json::json!({
        "dataset": path.display().to_string(),
        "checksum": format!("{:08x}", report.checksum),
        "rows_loaded": report.rows,
        "rows_skipped": report.skipped,
        "objects": db.len(),
        "hazardous_objects": hazardous,
        "approaches": db.orbit_count(),
        "approach_dates": db.by_date().len(),
        "first_approach": span.map(|(first, _)| first.to_string()),
        "last_approach": span.map(|(_, last)| last.to_string()),
    });

    match serde_json::to_string_pretty(&status) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error: {}", e),
    }
}
