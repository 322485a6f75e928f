use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod config;
pub mod container;
pub mod execute;
pub mod record;
pub mod search;

/// Record kinds the `record` command can decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Header,
    Mesh,
    Material,
    Skeleton,
    Parents,
    Transforms,
}

/// Parse resource flags given as decimal or `0x` hex.
pub fn parse_flags(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("Invalid flags '{s}': {e}"))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a container and summarise its contents
    Scan {
        /// Container file
        container: PathBuf,

        /// Settings file (defaults to the platform config location)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Index recorded in each archive entry
        #[arg(long, default_value_t = 0)]
        container_index: i32,

        /// Write the catalog listing as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Search a container's assets
    ///
    /// Terms: `word`, `key:value`, `key=value`, each negated with `!`.
    /// Keys are `name` and `type`.
    Search {
        /// Container file
        container: PathBuf,

        /// Query terms
        #[arg(required = true)]
        query: Vec<String>,

        /// Settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum results to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Resolve resource flags to a resource path
    Resolve {
        /// Container file
        container: PathBuf,

        /// Flags value, decimal or 0x hex
        #[arg(value_parser = parse_flags)]
        flags: u16,

        /// Settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Decode fixed-layout records from a file and print them as JSON
    Record {
        /// Source file
        file: PathBuf,

        /// Record kind
        #[arg(value_enum)]
        kind: RecordKind,

        /// Byte offset of the first record
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Number of consecutive records
        #[arg(long, default_value_t = 1)]
        count: usize,
    },

    /// Print the effective settings as TOML
    Config {
        /// Settings file
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        assert_eq!(parse_flags("0x8000"), Ok(0x8000));
        assert_eq!(parse_flags("0X0c"), Ok(12));
        assert_eq!(parse_flags("4"), Ok(4));
        assert!(parse_flags("0x10000").is_err());
        assert!(parse_flags("banana").is_err());
    }
}
