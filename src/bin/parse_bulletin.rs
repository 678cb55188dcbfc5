use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coastal_forecast_service::extractor::{InputFormat, DEFAULT_CONTENT_SELECTOR};
use coastal_forecast_service::services::ForecastService;

#[derive(Parser)]
#[command(name = "parse-bulletin")]
#[command(about = "Parse an NWS coastal waters forecast bulletin into JSON zones", long_about = None)]
struct Cli {
    /// Product page or bulletin text file (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// How to read the input
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    format: InputFormat,

    /// CSS selector of the node holding the product text in an HTML page
    #[arg(long, env = "CONTENT_SELECTOR", default_value = DEFAULT_CONTENT_SELECTOR)]
    selector: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log parser progress and skipped segments to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn read_input(input: Option<&PathBuf>) -> std::io::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Log filter used when `RUST_LOG` is not set
///
/// Skipped-segment warnings come from the parser, so they only reach stderr with `--verbose`.
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,coastal_forecast_service=debug"
    } else {
        "error"
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter(cli.verbose))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let raw = read_input(cli.input.as_ref())?;
    info!("Read {} bytes of input", raw.len());

    let service = ForecastService::new(cli.selector);
    let snapshot = service.parse_input(&raw, cli.format)?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&snapshot.zones)?
    } else {
        serde_json::to_string(&snapshot.zones)?
    };
    println!("{json}");

    info!("Parsed {} zones", snapshot.zones.len());
    Ok(())
}
