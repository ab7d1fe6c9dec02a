//! Page files and the `<sequence>.<name>.<type>` filename convention.
//!
//! Every page source file is named with exactly three dot-separated fields:
//!
//! ```text
//! 3.About Us.md       sequence=3, name="About Us", kind=Markdown
//! 10.landing.html     sequence=10, name="landing", kind=Html
//! 7.GitHub.link       sequence=7, name="GitHub", kind=Link
//! ```
//!
//! The name is shown as-is in navigation; its URL form replaces every run of
//! non-alphanumeric characters with `_` (`About Us` → `About_Us.html`).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("Invalid url name regex"));

/// Kind of page source, taken from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Markdown, converted to HTML before templating
    Markdown,
    /// Raw HTML fragment, used as-is
    Html,
    /// External link; the file content is the URL. Only shown in navigation.
    Link,
}

impl PageKind {
    /// All page kinds, in the order their extensions are documented.
    pub const ALL: [PageKind; 3] = [PageKind::Markdown, PageKind::Html, PageKind::Link];

    /// Parse a page kind from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "md" => Some(Self::Markdown),
            "html" => Some(Self::Html),
            "link" => Some(Self::Link),
            _ => None,
        }
    }

    /// The file extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Link => "link",
        }
    }

    /// The accepted extensions as a comma-separated list.
    pub fn allowed_extensions() -> String {
        Self::ALL
            .iter()
            .map(PageKind::extension)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check whether a path has a page extension.
    pub fn is_page_file(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .is_some()
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for PageKind {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| PageError::UnsupportedType(s.to_string()))
    }
}

/// A decoded page filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    pub sequence: i64,
    pub name: String,
    pub kind: PageKind,
}

impl FileName {
    /// Build a filename for a new page. Dots are removed from the name so the
    /// result always decodes back into three fields.
    pub fn new(sequence: i64, name: &str, kind: PageKind) -> Self {
        Self {
            sequence,
            name: name.replace('.', ""),
            kind,
        }
    }

    /// Decode `<sequence>.<name>.<type>`.
    pub fn decode(filename: &str) -> Result<Self, PageError> {
        let fields: Vec<&str> = filename.split('.').collect();
        let [sequence, name, kind] = fields[..] else {
            return Err(PageError::InvalidFileName(filename.to_string()));
        };

        let sequence = sequence
            .parse::<i64>()
            .map_err(|_| PageError::InvalidSequence {
                filename: filename.to_string(),
                sequence: sequence.to_string(),
            })?;

        Ok(Self {
            sequence,
            name: name.to_string(),
            kind: kind.parse()?,
        })
    }

    /// Encode back into the on-disk filename.
    pub fn encode(&self) -> String {
        format!("{}.{}.{}", self.sequence, self.name, self.kind)
    }

    /// The name as used in URLs.
    pub fn url_name(&self) -> String {
        url_safe_name(&self.name)
    }
}

/// Replace every run of characters outside `[a-zA-Z0-9]` with `_`.
pub fn url_safe_name(name: &str) -> String {
    NON_ALPHANUMERIC.replace_all(name, "_").into_owned()
}

/// A page source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Raw filename, e.g. `3.About Us.md`
    pub filename: String,
    /// URL-safe name, used for the output file (`About_Us`)
    pub url_name: String,
    /// Display name shown in navigation
    pub name: String,
    /// Where the source was read from
    pub source_path: PathBuf,
    pub kind: PageKind,
    /// Raw file content
    pub content: String,
    pub sequence: i64,
}

impl Page {
    /// Read the page file `filename` from `dir`.
    pub fn load(dir: &Path, filename: &str) -> Result<Self, PageError> {
        let decoded = FileName::decode(filename)?;
        let source_path = dir.join(filename);
        let content = fs::read_to_string(&source_path).map_err(|source| PageError::Read {
            path: source_path.clone(),
            source,
        })?;

        Ok(Self {
            filename: filename.to_string(),
            url_name: decoded.url_name(),
            name: decoded.name,
            source_path,
            kind: decoded.kind,
            content,
            sequence: decoded.sequence,
        })
    }

    /// A Markdown page that lives outside the page tree (index, 404).
    ///
    /// `filename` only has to be unique enough to never match a tree page
    /// when navigation decides which entry is active.
    pub fn standalone(
        source_path: &Path,
        name: impl Into<String>,
        url_name: impl Into<String>,
    ) -> Result<Self, PageError> {
        let content = fs::read_to_string(source_path).map_err(|source| PageError::Read {
            path: source_path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            filename: source_path.display().to_string(),
            url_name: url_name.into(),
            name: name.into(),
            source_path: source_path.to_path_buf(),
            kind: PageKind::Markdown,
            content,
            sequence: 0,
        })
    }

    /// Name of the generated HTML file.
    pub fn output_filename(&self) -> String {
        format!("{}.html", self.url_name)
    }
}

/// Find the sequence number a new page in `dir` should get: one more than the
/// highest existing page sequence, or 1 if the directory has no pages.
pub fn next_sequence(dir: &Path) -> Result<i64, PageError> {
    let entries = fs::read_dir(dir).map_err(|source| PageError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut highest: i64 = 0;
    for entry in entries {
        let entry = entry.map_err(|source| PageError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() || !PageKind::is_page_file(&path) {
            continue;
        }
        let filename = entry.file_name().to_string_lossy().into_owned();
        highest = highest.max(FileName::decode(&filename)?.sequence);
    }

    highest
        .checked_add(1)
        .ok_or_else(|| PageError::SequenceOverflow(dir.to_path_buf()))
}

/// Errors raised while decoding or reading page files.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Invalid filename '{0}': expected <sequence>.<name>.<type>")]
    InvalidFileName(String),

    #[error("Invalid filename '{filename}': sequence '{sequence}' is not a number")]
    InvalidSequence { filename: String, sequence: String },

    #[error(
        "Unknown page type '{0}', allowed types are {allowed}",
        allowed = PageKind::allowed_extensions()
    )]
    UnsupportedType(String),

    #[error("No sequence number left for a new page in {0}")]
    SequenceOverflow(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
