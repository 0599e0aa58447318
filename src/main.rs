use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::AsyncReadExt;
use tracing::info;

use travelbuddi::api::AppState;
use travelbuddi::export::{
    ARCHIVE_FILE, JSON_FILE, MARKDOWN_FILE, build_export_zip, export_to_json, plan_to_csv,
    plan_to_markdown,
};
use travelbuddi::{
    GeneratedPlan, PlaceEnricher, ProviderKind, ResponseCache, TravelBuddiConfig, TripRequest,
    classify_region, generate_plan_with_enrichment, logging, web,
};

#[derive(Debug, Parser)]
#[command(name = "travelbuddi")]
#[command(version, about = "Rule-based travel plans: packing, health, transport and food")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a plan from a JSON trip request
    Plan {
        /// Trip request JSON file, or `-` for stdin
        #[arg(long, short)]
        request: PathBuf,

        /// Write every export file into this directory instead of printing
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Also write the ZIP bundle (with --out)
        #[arg(long, requires = "out")]
        zip: bool,

        /// Printed format when no --out is given
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Place-search provider (offline, opentripmap, google-places)
        #[arg(long)]
        provider: Option<ProviderKind>,

        /// API key for the provider
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Show the region a destination is classified into
    Region { destination: String },
    /// Run the HTTP API
    Serve {
        #[arg(long, short)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TravelBuddiConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose);

    match cli.command {
        Command::Plan {
            request,
            out,
            zip,
            format,
            provider,
            api_key,
        } => {
            if let Some(provider) = provider {
                config.enrichment.provider = provider;
            }
            if api_key.is_some() {
                config.enrichment.api_key = api_key;
            }
            config.validate()?;

            let trip = read_request(&request).await?;
            let enricher = build_enricher(&config)?;
            let (plan, warning) = generate_plan_with_enrichment(&trip, enricher.as_ref()).await;
            if let Some(warning) = warning {
                eprintln!("Warning: {warning}");
            }

            match out {
                Some(dir) => write_exports(&dir, &trip, &plan, zip).await?,
                None => match format {
                    OutputFormat::Markdown => print!("{}", plan_to_markdown(&trip, &plan)),
                    OutputFormat::Json => println!("{}", export_to_json(&trip, &plan)?),
                },
            }
        }
        Command::Region { destination } => {
            if destination.trim().is_empty() {
                return Err(anyhow!("Please enter a destination."));
            }
            println!("{}", classify_region(&destination));
        }
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            web::run(port, AppState::new(config)).await?;
        }
    }

    Ok(())
}

async fn read_request(path: &Path) -> Result<TripRequest> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read trip request from stdin")?;
        text
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read trip request {}", path.display()))?
    };

    TripRequest::from_json(&text).map_err(|e| anyhow!(e.user_message()))
}

fn build_enricher(config: &TravelBuddiConfig) -> Result<Option<PlaceEnricher>> {
    let Some(enricher) = PlaceEnricher::from_config(&config.enrichment)? else {
        return Ok(None);
    };
    if !config.cache.enabled {
        return Ok(Some(enricher));
    }
    let cache = ResponseCache::new(Duration::from_secs(config.cache.ttl_seconds));
    Ok(Some(enricher.with_cache(Arc::new(cache))))
}

async fn write_exports(
    dir: &Path,
    trip: &TripRequest,
    plan: &GeneratedPlan,
    zip: bool,
) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut files = vec![
        (MARKDOWN_FILE, plan_to_markdown(trip, plan).into_bytes()),
        (JSON_FILE, export_to_json(trip, plan)?.into_bytes()),
    ];
    for file in plan_to_csv(plan)? {
        files.push((file.name, file.contents.into_bytes()));
    }
    if zip {
        files.push((ARCHIVE_FILE, build_export_zip(trip, plan)?));
    }

    for (name, bytes) in files {
        let path = dir.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{}", path.display());
    }
    info!("Wrote exports to {}", dir.display());
    Ok(())
}
