//! Page tree scanning.
//!
//! The pages directory is walked once, before anything is rendered. Each
//! directory holding at least one page file becomes a [`PageGroup`] keyed by
//! its path relative to the pages root:
//!
//! ```text
//! pages/                  → group "/"
//! ├── 1.Home.md
//! ├── 2.About.md
//! ├── logo.png            → copied to <build>/logo.png
//! ├── blog/               → group "/blog"
//! │   └── 1.First Post.md
//! └── images/             → no group, files still copied
//!     └── header.jpg
//! ```
//!
//! Pages in a subdirectory never belong to an ancestor's group.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::assets::{copy_file, AssetError};
use crate::page::{Page, PageError, PageKind};

/// Identity of the group for the pages root.
pub const ROOT: &str = "/";

/// How entries within a group are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageOrder {
    /// Directory listing order (ascending file name)
    #[default]
    Listing,
    /// Ascending sequence number; ties keep listing order
    Sequence,
}

impl FromStr for PageOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "listing" => Ok(Self::Listing),
            "sequence" => Ok(Self::Sequence),
            other => Err(other.to_string()),
        }
    }
}

/// The pages of one directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGroup {
    /// Directory path relative to the pages root, `/` for the root itself
    pub identity: String,
    pub entries: Vec<Page>,
}

/// All page groups of a site, keyed by identity.
#[derive(Debug, Clone, Default)]
pub struct PageTree {
    groups: BTreeMap<String, PageGroup>,
}

impl PageTree {
    /// Look up a group by identity.
    pub fn get(&self, identity: &str) -> Option<&PageGroup> {
        self.groups.get(identity)
    }

    /// Iterate groups in identity order.
    pub fn groups(&self) -> impl Iterator<Item = &PageGroup> {
        self.groups.values()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of pages across all groups, links included.
    pub fn page_count(&self) -> usize {
        self.groups.values().map(|g| g.entries.len()).sum()
    }
}

impl FromIterator<PageGroup> for PageTree {
    fn from_iter<I: IntoIterator<Item = PageGroup>>(iter: I) -> Self {
        Self {
            groups: iter
                .into_iter()
                .map(|group| (group.identity.clone(), group))
                .collect(),
        }
    }
}

/// Errors that can occur while scanning the page tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("Failed to list directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Walks the pages directory, mirroring non-page files into the output
/// directory and collecting page groups.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    pages_root: PathBuf,
    output_root: PathBuf,
    order: PageOrder,
}

/// Entries of one directory, split by what the scan does with them.
#[derive(Debug, Default)]
struct Listing {
    pages: Vec<String>,
    files: Vec<String>,
    directories: Vec<String>,
}

impl TreeBuilder {
    /// Create a builder for `pages_root`, mirroring files into `output_root`.
    pub fn new(pages_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            pages_root: pages_root.into(),
            output_root: output_root.into(),
            order: PageOrder::default(),
        }
    }

    /// Set how entries within each group are ordered.
    pub fn order(mut self, order: PageOrder) -> Self {
        self.order = order;
        self
    }

    /// Scan the whole tree.
    pub fn build(&self) -> Result<PageTree, TreeError> {
        let mut groups = BTreeMap::new();
        let output_root = fs::canonicalize(&self.output_root).ok();
        self.visit("", output_root.as_deref(), &mut groups)?;
        Ok(PageTree { groups })
    }

    fn visit(
        &self,
        current: &str,
        output_root: Option<&Path>,
        groups: &mut BTreeMap<String, PageGroup>,
    ) -> Result<(), TreeError> {
        let relative = current.trim_start_matches('/');
        let in_dir = self.pages_root.join(relative);
        let out_dir = self.output_root.join(relative);
        let listing = list(&in_dir)?;

        for directory in &listing.directories {
            let path = in_dir.join(directory);
            if output_root.is_some() && fs::canonicalize(&path).ok().as_deref() == output_root {
                tracing::debug!("Skipping output directory {}", path.display());
                continue;
            }
            self.visit(&format!("{}/{}", current, directory), output_root, groups)?;
        }

        for file in &listing.files {
            copy_file(&in_dir.join(file), &out_dir.join(file))?;
        }

        if listing.pages.is_empty() {
            return Ok(());
        }

        let mut entries = listing
            .pages
            .iter()
            .map(|filename| Page::load(&in_dir, filename))
            .collect::<Result<Vec<_>, _>>()?;

        if self.order == PageOrder::Sequence {
            entries.sort_by_key(|page| page.sequence);
        }

        let identity = if current.is_empty() {
            ROOT.to_string()
        } else {
            current.to_string()
        };

        tracing::debug!("Found group {} with {} pages", identity, entries.len());
        groups.insert(identity.clone(), PageGroup { identity, entries });

        Ok(())
    }
}

/// List a directory sorted by file name and partition its entries.
fn list(dir: &Path) -> Result<Listing, TreeError> {
    let list_error = |source| TreeError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(list_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(list_error)?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut listing = Listing::default();
    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if path.is_dir() {
            listing.directories.push(name);
        } else if PageKind::is_page_file(&path) {
            listing.pages.push(name);
        } else {
            listing.files.push(name);
        }
    }

    Ok(listing)
}
