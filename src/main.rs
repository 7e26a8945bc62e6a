use analytics::{ChartReport, TrendEngine};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::{init_tracing, load_config, LoggingSettings};
use std::fs::File;
use std::path::{Path, PathBuf};

/// The main entry point for the Tally application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; settings fall back to config.toml and defaults.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Analyze(args) => handle_analyze(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Personal data tracking: charts, data points and their trends.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the JSON HTTP API.
    Serve(ServeArgs),
    /// Print the trend and statistics of an exported CSV file.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Overrides `server.host` from the configuration.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port` from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// A CSV file with `Date,Measurement[,Label]` columns.
    #[arg(long)]
    file: PathBuf,

    /// Print the full report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut settings = load_config(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    settings.validate()?;

    // Held until the server exits so the file writer flushes.
    let _guard = init_tracing(&settings.logging)?;
    tracing::info!(config = %args.config.display(), "Starting Tally.");

    web_server::run_server(settings).await
}

fn handle_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let _guard = init_tracing(&LoggingSettings {
        filter: "warn".to_string(),
        ..Default::default()
    })?;

    let report = analyze_file(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_report(&report));
    }
    Ok(())
}

/// Reads an exported CSV file and computes its report.
fn analyze_file(path: &Path) -> anyhow::Result<ChartReport> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let observations = exporter::import_observations(file)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(TrendEngine::new().report(&observations))
}

fn render_report(report: &ChartReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);

    table.add_row(vec!["Slope".to_string(), format!("{:.4}", report.trend.slope)]);
    table.add_row(vec!["Intercept".to_string(), format!("{:.4}", report.trend.intercept)]);
    table.add_row(vec!["R²".to_string(), format!("{:.4}", report.trend.r_squared)]);
    table.add_row(vec!["Direction".to_string(), format!("{:?}", report.direction)]);

    match &report.statistics {
        Some(stats) => {
            table.add_row(vec!["Count".to_string(), stats.count.to_string()]);
            table.add_row(vec!["Min".to_string(), stats.min.to_string()]);
            table.add_row(vec!["Max".to_string(), stats.max.to_string()]);
            table.add_row(vec!["Average".to_string(), format!("{:.4}", stats.average)]);
            table.add_row(vec!["Earliest".to_string(), stats.earliest.to_string()]);
            table.add_row(vec!["Latest".to_string(), stats.latest.to_string()]);
        }
        None => {
            table.add_row(vec!["Count".to_string(), "0".to_string()]);
        }
    }

    table
}
