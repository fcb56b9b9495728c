use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::{Config, TrendScope};
use core_types::{InsightSummary, OwnerId};
use database::{connect, run_migrations, DbRepository};
use reporting::{ForecastReport, ReportSettings, SalesReporter};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// The main entry point for the SalesCast application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config(&cli.config)?;
    if let Some(scope) = cli.trend_scope {
        config.insights.trend_scope = scope;
    }
    let _guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve { addr } => {
            if let Some(addr) = addr {
                config.server.host = addr.ip().to_string();
                config.server.port = addr.port();
            }
            web_server::run_server(config).await
        }
        command => {
            let reporter = build_reporter(&config).await?;
            run_command(command, &reporter).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Sales history uploads, moving-average forecasts and trend insights.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML settings file. A missing file falls back to defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Overrides `insights.trend_scope` from the settings file.
    #[arg(long, global = true, value_enum)]
    trend_scope: Option<TrendScope>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API.
    Serve {
        /// Listen address, e.g. "127.0.0.1:5000". Defaults to the configured host and port.
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Replace an owner's sales with the rows of a CSV file.
    Import {
        #[arg(long)]
        owner: OwnerId,
        #[arg(long)]
        file: PathBuf,
    },
    /// Print the moving-average forecast for an owner.
    Forecast {
        #[arg(long)]
        owner: OwnerId,
        /// Window in days. Defaults to `forecast.default_window_size`.
        #[arg(long)]
        window: Option<usize>,
    },
    /// Print the best seller, lowest day and trend for an owner.
    Insights {
        #[arg(long)]
        owner: OwnerId,
    },
    /// List an owner's stored sales, newest first.
    Records {
        #[arg(long)]
        owner: OwnerId,
    },
    /// Delete every stored sale of an owner.
    Clear {
        #[arg(long)]
        owner: OwnerId,
    },
}

async fn build_reporter(config: &Config) -> anyhow::Result<SalesReporter> {
    let db_pool = connect(&config.database).await?;
    run_migrations(&db_pool).await?;
    let repo = Arc::new(DbRepository::new(db_pool));
    Ok(SalesReporter::new(repo, ReportSettings::from_config(config)))
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn run_command(command: Commands, reporter: &SalesReporter) -> anyhow::Result<()> {
    match command {
        Commands::Serve { .. } => anyhow::bail!("serve does not run through the reporter"),
        Commands::Import { owner, file } => {
            let reader = BufReader::new(File::open(&file)?);
            let report = reporter.ingest_csv(owner, reader).await?;
            println!(
                "Imported {} of {} rows for owner {} (import {}).",
                report.rows_stored, report.rows_read, owner, report.import_id
            );
            println!(
                "Replaced {} previous records; skipped {} rows; {} rows have unreadable dates.",
                report.replaced, report.rows_skipped, report.unparseable_dates
            );
        }
        Commands::Forecast { owner, window } => {
            let report = reporter.forecast(owner, window).await?;
            println!("{}", forecast_table(&report));
        }
        Commands::Insights { owner } => {
            let summary = reporter.compute_insights(owner).await?;
            println!("{}", insights_table(&summary));
        }
        Commands::Records { owner } => {
            let records = reporter.records(owner).await?;
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_header(vec!["ID", "Date", "Product", "Quantity"]);
            for record in &records {
                table.add_row(vec![
                    record.id.to_string(),
                    record.date.clone(),
                    record.product.clone(),
                    record.quantity.to_string(),
                ]);
            }
            println!("{}", table);
            println!("{} records.", records.len());
        }
        Commands::Clear { owner } => {
            let deleted = reporter.clear(owner).await?;
            println!("Deleted {} records for owner {}.", deleted, owner);
        }
    }

    Ok(())
}

fn forecast_table(report: &ForecastReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![
            "Date".to_string(),
            "Total Quantity".to_string(),
            format!("Forecast ({}-day MA)", report.window_size),
        ]);
    for point in &report.points {
        table.add_row(vec![
            point.date.to_string(),
            point.total_quantity.to_string(),
            format!("{:.2}", point.forecast),
        ]);
    }
    table
}

fn insights_table(summary: &InsightSummary) -> Table {
    let best = summary
        .best_selling_product
        .as_ref()
        .map(|p| format!("{} ({} units)", p.product, p.total_quantity))
        .unwrap_or_else(|| "N/A".to_string());
    let lowest = summary
        .lowest_sales_day
        .as_ref()
        .map(|d| format!("{} ({} units)", d.date, d.total_quantity))
        .unwrap_or_else(|| "N/A".to_string());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Insight", "Value"]);
    table.add_row(vec!["Best-selling product".to_string(), best]);
    table.add_row(vec!["Lowest sales day".to_string(), lowest]);
    table.add_row(vec!["Sales trend".to_string(), summary.trend.label().to_string()]);
    table
}
