//! CLI command for inspecting settings

use std::path::Path;

use crate::config::Settings;

/// Print the effective settings as TOML
pub fn execute(path: Option<&Path>) -> anyhow::Result<()> {
    match path.map(Path::to_path_buf).or_else(Settings::default_path) {
        Some(source) if path.is_some() || source.is_file() => {
            println!("# {}", source.display());
        }
        _ => println!("# defaults"),
    }

    let settings = Settings::load_or_default(path)?;
    print!("{}", settings.to_toml_string()?);
    Ok(())
}
