//! Command execution implementations

use super::Commands;
use super::{config, container, record, search};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Scan {
                container: source,
                config: settings,
                container_index,
                json,
            } => container::scan(source, settings.as_deref(), *container_index, json.as_deref()),
            Commands::Search {
                container: source,
                query,
                config: settings,
                limit,
            } => search::execute(source, &query.join(" "), settings.as_deref(), *limit),
            Commands::Resolve {
                container: source,
                flags,
                config: settings,
            } => container::resolve(source, *flags, settings.as_deref()),
            Commands::Record {
                file,
                kind,
                offset,
                count,
            } => record::execute(file, *kind, *offset, *count),
            Commands::Config { path } => config::execute(path.as_deref()),
        }
    }
}
