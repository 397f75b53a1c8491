//! Listing fixtures
//!
//! Fixtures are a JSON array of listings in the create-request shape, with
//! optional `id`, `owner`, flags and timestamps. They are read from a local
//! file or fetched over HTTP.

use crate::models::{NewProperty, Property};
use crate::search::PropertyStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Owner assigned to fixtures that do not name one
pub const DEFAULT_SEED_OWNER: &str = "seed-user";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub listing: NewProperty,
}

impl Fixture {
    pub fn into_property(self, default_owner: &str, now: DateTime<Utc>) -> Property {
        let id = self
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let owner = self.owner.unwrap_or_else(|| default_owner.to_string());
        let created_at = self.created_at.unwrap_or(now);

        Property {
            featured: self.featured,
            verified: self.verified,
            views: self.views,
            created_at,
            updated_at: created_at,
            ..self.listing.into_property(id, owner, now)
        }
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch_remote(source: &str) -> Result<String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to create HTTP client")?;

    debug!("Fetching fixtures from {}", source);
    let response = client
        .get(source)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {source}"))?;

    if !response.status().is_success() {
        warn!("Fixture source returned status: {}", response.status());
        anyhow::bail!("Failed to fetch {}: {}", source, response.status());
    }

    response.text().await.context("Failed to read response body")
}

/// Parse fixtures from JSON text
pub fn parse(raw: &str) -> Result<Vec<Fixture>> {
    serde_json::from_str(raw).context("Fixture data is not a JSON array of listings")
}

/// Load fixtures from a file path or an http(s) URL
pub async fn load(source: &str) -> Result<Vec<Fixture>> {
    let raw = if is_remote(source) {
        fetch_remote(source).await?
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read fixture file {source}"))?
    };

    let fixtures = parse(&raw)?;
    info!("Loaded {} fixtures from {}", fixtures.len(), source);
    Ok(fixtures)
}

/// Replace the store contents with `fixtures`.
///
/// Fixtures failing validation are skipped with a warning. Returns the
/// number imported.
pub async fn import<S>(store: &S, fixtures: Vec<Fixture>, default_owner: &str) -> Result<usize>
where
    S: PropertyStore + ?Sized,
{
    store.clear().await.context("Failed to clear existing properties")?;

    let now = Utc::now();
    let mut imported = 0;
    for (i, fixture) in fixtures.into_iter().enumerate() {
        if let Err(reason) = fixture.listing.validate() {
            warn!("Skipping fixture #{}: {}", i, reason);
            continue;
        }
        let property = fixture.into_property(default_owner, now);
        store
            .insert(property)
            .await
            .with_context(|| format!("Failed to import fixture #{i}"))?;
        imported += 1;
    }

    info!("💾 Imported {} properties into {}", imported, store.backend_name());
    Ok(imported)
}
