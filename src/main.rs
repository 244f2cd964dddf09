use clap::Parser;
use log::{debug, error, info};
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use ticker_resolver::{CsvSecurityProvider, Geography, Language, StaticOracle, TickerResolver};

/// Resolves company mentions into ticker symbols. Reads the extraction oracle's output
/// from stdin and prints one line per mention group.
#[derive(Parser)]
#[command(name = "ticker-resolver-cli")]
#[command(about = "Resolve extracted company mentions into exchange-aware tickers", long_about = None)]
struct Cli {
    /// Securities corpus (CSV, optionally gzip compressed)
    #[arg(short, long)]
    corpus: PathBuf,

    /// Preferred market: us, hk, china or global
    #[arg(short, long, default_value = "global")]
    geography: Geography,

    /// Query language: en or zh
    #[arg(short, long, default_value = "en")]
    language: Language,

    /// The original user query, used to drop an echoed copy from the oracle output
    #[arg(short, long, default_value = "")]
    query: String,

    /// Print the rationale behind each selected ticker
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut oracle_output = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut oracle_output) {
        error!("Failed to read from stdin: {}", e);
        std::process::exit(1);
    }

    let provider = Arc::new(CsvSecurityProvider::new(cli.corpus));
    info!("Using securities corpus {}", provider.path().display());

    let resolver = TickerResolver::new(provider, Arc::new(StaticOracle::new(&oracle_output)));
    debug!("Resolver config: {:?}", resolver.config());

    let resolution = match resolver
        .resolve(&cli.query, cli.geography, cli.language, None)
        .await
    {
        Ok(resolution) => resolution,
        Err(e) => {
            error!("Error resolving tickers: {}", e);
            std::process::exit(1);
        }
    };

    for group in &resolution.groups {
        println!("{}: {}", group.original_text, group.tickers.join(", "));
    }

    if cli.debug {
        match serde_json::to_string_pretty(&resolution.debug_map) {
            Ok(debug_output) => eprintln!("{}", debug_output),
            Err(e) => error!("Failed to render debug output: {}", e),
        }
    }
}
