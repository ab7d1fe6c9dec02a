//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::assets::{copy_dir, AssetError};
use crate::config::SiteConfig;
use crate::page::{Page, PageError, PageKind};
use crate::render::{PageRenderer, RenderError};
use crate::tree::{TreeBuilder, TreeError};

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages written, index and 404 included
    pub pages: usize,

    /// Number of page groups found
    pub groups: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Builds a site from a resolved [`SiteConfig`].
///
/// The page tree is scanned completely before the first page is rendered,
/// and rendering only ever reads it.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    config: SiteConfig,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Build the site.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let config = &self.config;

        tracing::info!("Pages source directory: {}", config.pages_dir.display());
        tracing::info!("Output target directory: {}", config.build_dir.display());
        tracing::info!("Main template file: {}", config.main_file.display());
        tracing::info!("Resources directory: {}", config.resources_dir.display());

        let template = read(&config.main_file)?;

        fs::create_dir_all(&config.build_dir).map_err(|source| BuildError::Write {
            path: config.build_dir.clone(),
            source,
        })?;

        self.copy_resources()?;

        let tree = TreeBuilder::new(&config.pages_dir, &config.build_dir)
            .order(config.page_order)
            .build()?;

        let variables = config.variables();
        let renderer = PageRenderer::new(&template, &variables, &tree)?;
        let mut pages = 0;

        for group in tree.groups() {
            let out_dir = config
                .build_dir
                .join(group.identity.trim_start_matches('/'));

            for page in group.entries.iter().filter(|p| p.kind != PageKind::Link) {
                let html = renderer.render(page, Some(&group.identity))?;
                let path = out_dir.join(page.output_filename());
                write(&path, &html)?;
                tracing::debug!("Wrote {}", path.display());
                pages += 1;
            }
        }

        let index = Page::standalone(&config.index_file, config.title.as_str(), "index")?;
        let not_found = Page::standalone(
            &config.not_found_file,
            format!("{} - 404", config.title),
            "404",
        )?;

        for page in [index, not_found] {
            let html = renderer.render(&page, None)?;
            let path = config.build_dir.join(page.output_filename());
            write(&path, &html)?;
            tracing::info!("Wrote {}", path.display());
            pages += 1;
        }

        Ok(BuildResult {
            pages,
            groups: tree.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: config.build_dir.clone(),
        })
    }

    fn copy_resources(&self) -> Result<(), BuildError> {
        let config = &self.config;

        if !config.resources_dir.is_dir() {
            tracing::warn!(
                "Resources directory not found: {}",
                config.resources_dir.display()
            );
            return Ok(());
        }

        let copied = copy_dir(&config.resources_dir, &config.resources_output_dir)?;
        tracing::info!(
            "Copied {} resource files to {}",
            copied,
            config.resources_output_dir.display()
        );

        Ok(())
    }
}

fn read(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: &str) -> Result<(), BuildError> {
    let write_error = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, content).map_err(write_error)
}
