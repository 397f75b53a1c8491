use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use property_search::api::{self, AppState};
use property_search::config::load_config;
use property_search::search::{self, parse_criteria, QueryDescriptor};
use property_search::seed::{self, DEFAULT_SEED_OWNER};
use property_search::store::MemoryStore;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[clap(name = "property-search")]
#[clap(about = "Property listing search API")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API
    Serve {
        /// JSON config file
        #[clap(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Fixture file or URL to load at startup
        #[clap(short, long)]
        seed: Option<String>,
    },
    /// Run one search against a fixture set and print the page
    Search {
        /// Fixture file or URL
        #[clap(short, long)]
        seed: String,

        /// Search parameters as key=value (e.g. city=pune maxPrice=200)
        params: Vec<String>,
    },
}

fn parse_params(raw: &[String]) -> HashMap<String, String> {
    raw.iter()
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .collect()
}

async fn serve(config_path: PathBuf, seed_source: Option<String>) -> Result<()> {
    let mut config = load_config(Some(&config_path))?;
    if seed_source.is_some() {
        config.seed = seed_source;
    }

    let store = Arc::new(MemoryStore::new());
    if let Some(source) = &config.seed {
        let fixtures = seed::load(source).await?;
        seed::import(store.as_ref(), fixtures, DEFAULT_SEED_OWNER).await?;
    }

    let addr = config.bind_addr();
    let app = api::router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}

async fn run_search(seed_source: String, raw_params: Vec<String>) -> Result<()> {
    let store = MemoryStore::new();
    let fixtures = seed::load(&seed_source).await?;
    seed::import(&store, fixtures, DEFAULT_SEED_OWNER).await?;

    let criteria = parse_criteria(&parse_params(&raw_params));
    let page = search::execute(&store, &QueryDescriptor::from_criteria(&criteria)).await?;

    info!(
        "✅ {} of {} matches (page {}/{})",
        page.items.len(),
        page.total,
        page.current,
        page.pages
    );

    for (i, property) in page.items.iter().enumerate() {
        println!("{}. {} ({} {:?})", i + 1, property.title, property.price, property.price_unit);
        println!("   {}, {}, {}", property.location.address, property.location.city, property.location.state);
        println!("   {:?} for {:?}, {} {:?}", property.property_type, property.listing_type, property.area, property.area_unit);
        if let Some(bedrooms) = property.bedrooms {
            println!("   Bedrooms: {}", bedrooms);
        }
        println!("   ID: {}", property.id);
        println!();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    info!("🏠 Property Search");

    match Cli::parse().command {
        Command::Serve { config, seed } => serve(config, seed).await,
        Command::Search { seed, params } => run_search(seed, params).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let params = parse_params(&[
            "city=pune".to_string(),
            "maxPrice=200".to_string(),
            "broken".to_string(),
            "keyword=a=b".to_string(),
        ]);
        assert_eq!(params.len(), 3);
        assert_eq!(params["city"], "pune");
        assert_eq!(params["keyword"], "a=b");
    }
}
