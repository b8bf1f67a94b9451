use anyhow::Context;
use clap::{Parser, Subcommand};
use resource_search::{
    catalog::CatalogSnapshot,
    config::Config,
    search::{SearchEngine, SearchQuery, SearchResult},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "resource-search")]
#[command(about = "Search a cloud resource catalog snapshot", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "RESOURCE_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog snapshot (.json, .yaml or .yml)
    #[arg(short = 'f', long, env = "RESOURCE_SEARCH_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    Search {
        #[arg(value_name = "QUERY")]
        query: String,

        /// Print results as JSON
        #[arg(short, long)]
        json: bool,

        /// Show at most this many results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Autocomplete a partial input
    Suggest {
        #[arg(value_name = "PARTIAL")]
        partial: String,
    },

    /// Show how a query is parsed
    Parse {
        #[arg(value_name = "QUERY")]
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(&config);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Starting resource-search");

    match cli.command {
        Commands::Search { query, json, limit } => {
            let engine = load_engine(cli.catalog.as_deref(), &config).await?;

            let mut results = engine.search(&query);
            if let Some(limit) = limit {
                results.truncate(limit);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_results(&results);
            }
        }

        Commands::Suggest { partial } => {
            let engine = load_engine(cli.catalog.as_deref(), &config).await?;

            for suggestion in engine.suggestions(&partial) {
                println!("{}", suggestion);
            }
        }

        Commands::Parse { query } => {
            let parsed = SearchQuery::parse(&query);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }

    Ok(())
}

async fn load_engine(catalog: Option<&Path>, config: &Config) -> anyhow::Result<SearchEngine> {
    let path = catalog.context("a catalog snapshot is required (--catalog <FILE>)")?;
    let snapshot = CatalogSnapshot::load(path)
        .await
        .with_context(|| format!("failed to load catalog {}", path.display()))?;

    let mut engine = SearchEngine::new(config.search.clone())?;
    engine.set_catalog(snapshot.resources);
    Ok(engine)
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("resource_search={}", config.observability.log_level).into()
    });

    // Logs go to stderr so stdout stays machine-readable
    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_results(results: &[SearchResult]) {
    if results.is_empty() {
        println!("No matching resources");
        return;
    }

    println!(
        "{:>6}  {:<14}  {:<32}  {:<40}  {}",
        "SCORE", "MATCH", "NAME", "TYPE", "MATCHED"
    );
    for result in results {
        println!(
            "{:>6}  {:<14}  {:<32}  {:<40}  {}",
            result.score,
            result.match_type.to_string(),
            result.resource.name,
            result.resource.resource_type,
            result.matched_text
        );
    }
    println!();
    println!("{} matches", results.len());
}
