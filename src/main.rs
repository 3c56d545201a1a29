//! citycast CLI
//!
//! Look up a city's 5-day forecast from the terminal or serve the
//! single-page web surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use citycast::{AppConfig, WeatherApiClient, chart, fetch_city_forecast, web};

/// citycast CLI
#[derive(Parser)]
#[command(name = "citycast")]
#[command(author, version, about = "City weather lookup with a 5-day temperature chart", long_about = None)]
struct Cli {
    /// Path to a configuration file (defaults to citycast.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a city's 5-day forecast and write the temperature chart
    Forecast {
        /// City name to look up
        city: String,

        /// Where to write the chart SVG (overrides the configured path)
        #[arg(long)]
        chart: Option<PathBuf>,
    },

    /// Serve the single-page web surface
    Serve {
        /// Port to bind (overrides the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Determine the log filter from the verbosity count, falling back to the
/// configured level when no flag is given
fn log_filter(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn init_tracing(verbose: u8, config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(verbose, &config.logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load_from_path(cli.config.clone())?;

    init_tracing(cli.verbose, &config);

    match cli.command {
        Commands::Forecast { city, chart } => run_forecast(&config, &city, chart).await,
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            web::run(config).await
        }
    }
}

async fn run_forecast(
    config: &AppConfig,
    city: &str,
    chart_override: Option<PathBuf>,
) -> anyhow::Result<()> {
    let client = WeatherApiClient::new(config.endpoints.clone())?;

    let report = match fetch_city_forecast(&client, city).await {
        Ok(report) => report,
        Err(e) => {
            println!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    print!("{}", report.to_text());

    let mut options = config.chart.clone();
    if let Some(path) = chart_override {
        options.output_path = path.to_string_lossy().into_owned();
    }

    match chart::draw_temperature_chart(None, report.days(), &options) {
        Ok(handle) => {
            println!("📊 Chart saved to {}", handle.path().display());
            Ok(())
        }
        Err(e) => {
            println!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
