//! Site build command.

use std::path::Path;

use anyhow::{Context, Result};
use quire_site::{ConfigValues, SiteBuilder, SiteConfig};

/// Run the build command.
pub fn run(dir: &Path, config: &Path) -> Result<()> {
    tracing::info!("Building site...");

    let config_path = dir.join(config);
    let values = ConfigValues::load(&config_path)?;
    tracing::info!("Loaded config from {}", config_path.display());

    let config = SiteConfig::from_values(&values, dir)
        .with_context(|| format!("Invalid config in {}", config_path.display()))?;

    let result = SiteBuilder::new(config)
        .build()
        .context("Build failed")?;

    tracing::info!(
        "Built {} pages in {} groups in {}ms",
        result.pages,
        result.groups,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
