//! `{{kind:value:options}}` marker extraction.
//!
//! Markers are placeholders embedded anywhere in page or template text:
//!
//! ```text
//! <title>{{var:title}}</title>
//!     {{nav:/blog}}
//! {{render:content}}
//! ```
//!
//! Extraction only parses the syntax; whether a kind or value is known is
//! decided when the marker is resolved.

/// Opening marker delimiter.
pub const OPEN: &str = "{{";

/// Closing marker delimiter.
pub const CLOSE: &str = "}}";

/// Columns a tab counts for when measuring indentation.
const TAB_WIDTH: usize = 4;

/// A marker found in a block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// First field (`nav`, `var`, `render`)
    pub kind: String,
    /// Second field, the lookup key
    pub value: String,
    /// Any further fields
    pub options: Vec<String>,
    /// Whitespace immediately before the opening delimiter, tabs as 4
    pub indent: usize,
    /// Exact text between the delimiters
    pub raw_target: String,
}

impl Marker {
    /// The full placeholder text, delimiters included.
    pub fn placeholder(&self) -> String {
        format!("{OPEN}{}{CLOSE}", self.raw_target)
    }
}

/// Errors for malformed markers. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    #[error("Invalid marker syntax at line {line}: opening delimiter '{{{{' without closing delimiter '}}}}'")]
    Unclosed { line: usize },

    #[error("Invalid marker syntax at line {line}: missing value after type in '{target}'")]
    MissingValue { line: usize, target: String },
}

/// Extract every marker in `text`, in order of appearance.
pub fn extract_markers(text: &str) -> Result<Vec<Marker>, MarkerError> {
    let mut markers = Vec::new();

    for (index, line) in text.split('\n').enumerate() {
        let line_number = index + 1;
        let mut cursor = 0;

        while let Some(found) = line[cursor..].find(OPEN) {
            let open = cursor + found;
            let start = open + OPEN.len();
            let end = match line[start..].find(CLOSE) {
                Some(len) => start + len,
                None => return Err(MarkerError::Unclosed { line: line_number }),
            };

            let target = &line[start..end];
            let mut fields = target.split(':');
            let (Some(kind), Some(value)) = (fields.next(), fields.next()) else {
                return Err(MarkerError::MissingValue {
                    line: line_number,
                    target: target.to_string(),
                });
            };

            markers.push(Marker {
                kind: kind.to_string(),
                value: value.to_string(),
                options: fields.map(str::to_string).collect(),
                indent: measure_indent(&line[..open]),
                raw_target: target.to_string(),
            });

            cursor = end + CLOSE.len();
        }
    }

    Ok(markers)
}

/// Count the run of spaces and tabs at the end of `prefix`.
fn measure_indent(prefix: &str) -> usize {
    prefix
        .chars()
        .rev()
        .map_while(|c| match c {
            ' ' => Some(1),
            '\t' => Some(TAB_WIDTH),
            _ => None,
        })
        .sum()
}
