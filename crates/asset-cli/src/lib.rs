//! Command implementations behind the `asset-lens` binary
//!
//! Each command reads its input file, runs the library operation and
//! returns the text to print, so the binary only parses arguments and
//! maps errors to the exit code.

#![warn(missing_docs)]

use std::path::Path;

use anyhow::{Context, Result};
use asset_filter::{filter_asset_keys, filter_partition_names};
use asset_model::{ingest_bundle_json, AssetKey, FilterQuery};
use asset_view::{render_text, AssetNodeDefinitionView, ViewConfig, ViewInputs};
use tracing_subscriber::EnvFilter;

/// Options of the `show` command
#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    /// Print the view as JSON instead of text
    pub json: bool,
    /// TOML or YAML view configuration
    pub config: Option<std::path::PathBuf>,
    /// Query narrowing the neighbor lists
    pub filter_neighbors: Option<String>,
}

/// Install the global subscriber; `RUST_LOG` overrides the `info` default
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // A second init (tests) keeps the first subscriber.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Build and render the detail view of a fetched bundle
///
/// # Errors
/// Returns error if a file cannot be read or the bundle fails ingestion
pub fn show(bundle_path: &Path, options: &ShowOptions) -> Result<String> {
    let config = match &options.config {
        Some(path) => ViewConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ViewConfig::default(),
    };

    let json = read(bundle_path)?;
    let bundle = ingest_bundle_json(&json, &config.ingest)
        .with_context(|| format!("failed to ingest {}", bundle_path.display()))?;

    let query = FilterQuery::from_option(options.filter_neighbors.as_deref());
    let mut inputs = ViewInputs::new(
        &bundle.definition,
        &bundle.upstream,
        &bundle.downstream,
        &bundle.live,
    );
    if !query.is_identity() {
        inputs = inputs.with_neighbor_filter(&query);
    }
    let view = AssetNodeDefinitionView::build(&inputs, &config);
    tracing::info!(asset = %view.key, "rendered asset definition");

    if options.json {
        serde_json::to_string_pretty(&view).context("failed to serialize view")
    } else {
        Ok(render_text(&view))
    }
}

/// Filter a JSON array of key paths (`[["a", "b"], ...]`)
///
/// # Errors
/// Returns error if the file cannot be read or holds an invalid key
pub fn filter_keys(path: &Path, query: &str) -> Result<String> {
    let keys: Vec<AssetKey> = serde_json::from_str(&read(path)?)
        .with_context(|| format!("{} is not a list of asset key paths", path.display()))?;
    if let Some(bad) = keys.iter().position(AssetKey::is_empty) {
        anyhow::bail!("asset key #{bad} in {} has no segments", path.display());
    }
    let found = filter_asset_keys(&keys, query);
    tracing::debug!(total = keys.len(), matched = found.len(), "filtered asset keys");
    serde_json::to_string_pretty(&*found).context("failed to serialize keys")
}

/// Filter a JSON array of partition names
///
/// # Errors
/// Returns error if the file cannot be read or is not a string array
pub fn filter_partitions(path: &Path, query: &str) -> Result<String> {
    let names: Vec<String> = serde_json::from_str(&read(path)?)
        .with_context(|| format!("{} is not a list of partition names", path.display()))?;
    let found = filter_partition_names(&names, query);
    tracing::debug!(total = names.len(), matched = found.len(), "filtered partition names");
    serde_json::to_string_pretty(&*found).context("failed to serialize partition names")
}
