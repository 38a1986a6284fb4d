//! CLI entry point for the bikeshare explorer.
//!
//! Provides subcommands for one-shot stat reports, the interactive prompt
//! loop, and the web UI server.

mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use bikeshare_explorer::filters::FilterSpec;
use bikeshare_explorer::loader::load_data;
use bikeshare_explorer::report;
use bikeshare_explorer::stats::{duration_stats, station_stats, time_stats, user_stats};
use bikeshare_explorer::web::run_server;

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory containing the city CSV files
    /// (defaults to $BIKESHARE_DATA_DIR, then "data")
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the four stat reports for one city under optional filters
    Stats {
        /// City to analyze: chicago, new york, or washington
        #[arg(short, long)]
        city: String,

        /// Month filter: january through june, or "all"
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Day filter: sunday through saturday, or "all"
        #[arg(long, default_value = "all")]
        day: String,
    },
    /// Prompt for filters interactively, looping until told to stop
    Interactive,
    /// Serve the web UI with bar-chart visualizations
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);

    match cli.command {
        Commands::Stats { city, month, day } => {
            let spec = FilterSpec::new(&city, &month, &day)?;
            let trips = load_data(&data_dir, &spec)?;
            info!(
                city = spec.city.title(),
                rows = trips.len(),
                "Trips loaded"
            );

            println!("{}", report::time_report(time_stats(&trips).as_ref()));
            println!("{}", report::station_report(station_stats(&trips).as_ref()));
            println!("{}", report::duration_report(duration_stats(&trips).as_ref()));
            println!("{}", report::user_report(&user_stats(&trips), spec.city));
        }
        Commands::Interactive => {
            prompt::run(&data_dir)?;
        }
        Commands::Serve { host, port } => {
            run_server(&host, port, data_dir).await?;
        }
    }

    Ok(())
}

fn resolve_data_dir(arg: Option<PathBuf>) -> PathBuf {
    arg.or_else(|| std::env::var("BIKESHARE_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}
