//! Create a new page file.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use quire_site::{next_sequence, FileName, PageKind};

/// Run the create command.
pub fn run(dir: &Path, name: &str, kind: &str) -> Result<()> {
    let kind: PageKind = kind.parse()?;
    let sequence = next_sequence(dir)?;
    let filename = FileName::new(sequence, name, kind).encode();
    let path = dir.join(&filename);

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    tracing::info!("Created {}", path.display());

    Ok(())
}
