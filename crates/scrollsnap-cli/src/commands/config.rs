use std::path::Path;

use anyhow::{Context, Result};
use scrollsnap_core::AppConfig;
use tracing::info;

pub fn run(config: &AppConfig, path: &Path, init: bool) -> Result<()> {
    let settings = config
        .snap
        .validate()
        .context("Snap configuration is invalid")?;

    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            config.save_to(path)?;
            info!("Wrote default config to {}", path.display());
            println!("Created {}", path.display());
        }
        return Ok(());
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("# {}", path.display());
    println!("{}", content);
    println!(
        "# snap lengths: x={} y={}, timeout {}ms, duration {}ms",
        settings.lengths.x,
        settings.lengths.y,
        settings.timeout.as_millis(),
        settings.duration.as_millis()
    );
    Ok(())
}
