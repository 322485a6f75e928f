//! CLI commands for scanning containers

use std::path::Path;
use std::time::Instant;

use crate::catalog::AssetCatalog;
use crate::cli::progress::{DISK, LINK, LOOKING_GLASS, print_done, print_step, simple_spinner};
use crate::config::Settings;
use crate::container::{self as containers, ResourceContainer};

/// Read and scan a container with the effective settings.
pub fn open(
    source: &Path,
    config: Option<&Path>,
    container_index: i32,
) -> anyhow::Result<(Settings, ResourceContainer)> {
    let settings = Settings::load_or_default(config)?;
    let bytes = std::fs::read(source)?;

    let directory = source
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let path = source.to_string_lossy();

    let container = containers::scan(&bytes, &directory, &path, container_index, &settings.layout)?;
    Ok((settings, container))
}

/// Scan a container and print per-type counts
pub fn scan(
    source: &Path,
    config: Option<&Path>,
    container_index: i32,
    json: Option<&Path>,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let total = if json.is_some() { 3 } else { 2 };

    print_step(1, total, LOOKING_GLASS, &format!("Scanning {}...", source.display()));
    let pb = simple_spinner("Reading tables...");
    let (settings, container) = open(source, config, container_index)?;
    pb.finish_and_clear();

    print_step(2, total, LINK, "Building catalog...");
    let catalog = AssetCatalog::open(&container, settings.catalog.duplicate_policy)?;

    println!("Resources ({}):", container.resources().len());
    for (index, resource) in container.resources().iter().enumerate() {
        println!("  [{index}] {resource}");
    }

    println!("Assets ({}):", catalog.len());
    for (asset_type, count) in catalog.type_counts() {
        println!("  {asset_type:<10} {count}");
    }

    if let Some(out) = json {
        print_step(3, total, DISK, &format!("Writing listing to {}...", out.display()));
        catalog.write_listing(out)?;
    }

    print_done(started.elapsed());
    Ok(())
}

/// Resolve flags against a container's resource list
pub fn resolve(source: &Path, flags: u16, config: Option<&Path>) -> anyhow::Result<()> {
    let (_, container) = open(source, config, 0)?;

    let resolved = container.resolve_resource_path(flags);
    if resolved.is_empty() {
        println!(
            "0x{flags:04x} does not resolve ({} resources)",
            container.resources().len()
        );
    } else {
        println!("0x{flags:04x} -> {resolved}");
    }
    Ok(())
}
