//! Fenced code block delimiters.

/// The token that opens and closes a fenced code block.
pub const FENCE: &str = "```";

/// An opening code fence, e.g. ```` ```rust ````.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fence {
    /// Language hint from the info string (first token after the fence)
    pub language: Option<String>,
}

impl Fence {
    /// Parse an opening fence line. Returns `None` if the line is not a fence.
    pub fn parse(line: &str) -> Option<Self> {
        let info = line.strip_prefix(FENCE)?;
        let language = info.split_whitespace().next().map(str::to_string);
        Some(Self { language })
    }

    /// Whether `line` closes an open code block.
    ///
    /// Only a line consisting of exactly the fence token closes a block, so
    /// ```` ```rust ```` inside a block is kept as code.
    pub fn is_close(line: &str) -> bool {
        line == FENCE
    }

    /// The HTML emitted in place of the opening fence line.
    pub fn opening_tag(&self) -> String {
        match &self.language {
            Some(lang) => format!("\n    <pre><code class='language-{}'>", lang),
            None => "\n    <pre><code>".to_string(),
        }
    }

    /// The HTML emitted in place of the closing fence line.
    pub fn closing_tag() -> &'static str {
        "\n    </code></pre>\n"
    }
}
