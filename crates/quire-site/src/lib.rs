//! Static site builder for quire.
//!
//! Turns a directory of numbered page files into a static HTML site. Pages
//! are grouped by directory, converted, and injected into a single site
//! template through `{{kind:value}}` markers.

pub mod assets;
pub mod builder;
pub mod config;
pub mod markers;
pub mod nav;
pub mod page;
pub mod render;
pub mod resolve;
pub mod tree;

pub use builder::{BuildError, BuildResult, SiteBuilder};
pub use config::{ConfigError, ConfigValues, SiteConfig};
pub use markers::{extract_markers, Marker, MarkerError};
pub use page::{next_sequence, FileName, Page, PageError, PageKind};
pub use render::{PageRenderer, RenderError};
pub use resolve::{resolve, ResolveContext, ResolveError};
pub use tree::{PageGroup, PageOrder, PageTree, TreeBuilder, TreeError};
