//! CLI command for searching container assets

use std::path::Path;

use console::style;

use super::container;
use crate::catalog::AssetCatalog;
use crate::cli::progress::simple_spinner;
use crate::search::SearchQuery;

/// Search a container's entries
pub fn execute(
    source: &Path,
    query: &str,
    config: Option<&Path>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let pb = simple_spinner("Scanning container...");
    let (settings, scanned) = container::open(source, config, 0)?;
    let catalog = AssetCatalog::open(&scanned, settings.catalog.duplicate_policy)?;
    pb.finish_and_clear();

    let parsed = SearchQuery::parse(query).with_reject_mode(settings.catalog.reject_mode);
    let results = catalog.filter(&parsed);

    if results.is_empty() {
        println!("No assets found matching '{}'", style(query).bold());
        return Ok(());
    }

    println!("Found {} assets:", results.len());
    let shown = limit.unwrap_or(results.len());
    for asset in results.iter().take(shown) {
        println!(
            "  {:<10} {:<11} {}",
            asset.asset_type(),
            asset.status(),
            asset.name()
        );
    }
    if shown < results.len() {
        println!("  ... and {} more", results.len() - shown);
    }

    Ok(())
}
