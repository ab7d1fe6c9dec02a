//! Markdown document conversion.
//!
//! Conversion is a single forward pass over the lines of the document. Each
//! non-blank line is classified by its literal prefix and rewritten into HTML;
//! a small amount of state tracks which containers are currently open:
//!
//! - the outer block (`<div>`), closed by two or more blank lines and reopened
//!   on the next non-blank line,
//! - the current paragraph (`<p>`), closed by a single blank line,
//! - a "wrap" (`<ul>` or `<blockquote>`), kept open while consecutive
//!   non-blank lines start with the same prefix,
//! - a fenced code block, whose lines are copied verbatim.

use crate::codeblock::Fence;
use crate::inline::substitute;

/// Classification of a non-blank line outside a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    ListItem,
    BlockQuote,
    CodeFence,
    Prose,
}

/// Prefix tests in priority order. The first matching prefix wins; a line
/// matching none of them is prose.
const CLASSIFIERS: [(&str, LineKind); 4] = [
    ("#", LineKind::Heading),
    ("- ", LineKind::ListItem),
    ("> ", LineKind::BlockQuote),
    (crate::codeblock::FENCE, LineKind::CodeFence),
];

/// Classify a non-blank line by its prefix.
pub fn classify(line: &str) -> LineKind {
    CLASSIFIERS
        .iter()
        .find(|(prefix, _)| line.starts_with(prefix))
        .map(|(_, kind)| *kind)
        .unwrap_or(LineKind::Prose)
}

/// Convert a Markdown document to an HTML fragment.
pub fn convert(markdown: &str) -> String {
    let mut state = ConversionState::new();

    for line in markdown.split('\n') {
        state.visit(line.strip_suffix('\r').unwrap_or(line));
    }

    state.finish()
}

/// A multi-line container keyed on a literal line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Wrap {
    tag: &'static str,
    prefix: &'static str,
}

const LIST: Wrap = Wrap {
    tag: "ul",
    prefix: "- ",
};

const BLOCKQUOTE: Wrap = Wrap {
    tag: "blockquote",
    prefix: "> ",
};

/// State of one conversion run.
#[derive(Debug)]
struct ConversionState {
    html: String,
    open_paragraph: bool,
    open_block: bool,
    in_code_block: bool,
    wrap: Option<Wrap>,
    blank_lines: usize,
}

impl ConversionState {
    fn new() -> Self {
        Self {
            html: String::from("<div>"),
            open_paragraph: false,
            open_block: true,
            in_code_block: false,
            wrap: None,
            blank_lines: 0,
        }
    }

    fn visit(&mut self, line: &str) {
        if self.in_code_block {
            if Fence::is_close(line) {
                self.in_code_block = false;
                self.html.push_str(Fence::closing_tag());
            } else {
                self.html.push('\n');
                self.html.push_str(line);
            }
            return;
        }

        if line.is_empty() {
            self.blank_lines += 1;
            return;
        }

        self.close_wrap_unless_continued(line);
        self.flush_blank_lines();
        self.open_block();

        let output = match classify(line) {
            LineKind::Heading => self.heading(line),
            LineKind::ListItem => self.list_item(line),
            LineKind::BlockQuote => self.blockquote(line),
            LineKind::CodeFence => self.code_fence(line),
            LineKind::Prose => self.prose(line),
        };

        self.blank_lines = 0;
        self.html.push_str(&output);
    }

    fn finish(mut self) -> String {
        if let Some(wrap) = self.wrap.take() {
            self.close(wrap);
        }
        self.close_paragraph();
        if self.open_block {
            self.html.push_str("\n</div>");
        }
        self.html
    }

    fn heading(&mut self, line: &str) -> String {
        let text = line.trim_start_matches('#');
        let level = line.len() - text.len();
        let text = text
            .strip_prefix(|c: char| c.is_whitespace())
            .unwrap_or(text);

        self.close_paragraph();
        format!("\n  <h{level}>{}</h{level}>", substitute(text))
    }

    fn list_item(&mut self, line: &str) -> String {
        self.open_wrap(LIST);
        let text = &line[LIST.prefix.len()..];
        format!("\n      <li>{}</li>", substitute(text))
    }

    fn blockquote(&mut self, line: &str) -> String {
        self.open_wrap(BLOCKQUOTE);
        let text = &line[BLOCKQUOTE.prefix.len()..];
        format!("\n{}", substitute(text))
    }

    fn code_fence(&mut self, line: &str) -> String {
        self.close_paragraph();
        self.in_code_block = true;
        Fence::parse(line).unwrap_or_default().opening_tag()
    }

    fn prose(&mut self, line: &str) -> String {
        if self.open_paragraph {
            self.html.push_str("<br>");
        } else {
            self.open_paragraph = true;
            self.html.push_str("\n  <p>\n");
        }
        substitute(line)
    }

    fn open_block(&mut self) {
        if !self.open_block {
            self.open_block = true;
            self.html.push_str("\n<div>");
        }
    }

    fn open_wrap(&mut self, wrap: Wrap) {
        if self.wrap.is_none() {
            self.wrap = Some(wrap);
            self.html.push_str("\n    <");
            self.html.push_str(wrap.tag);
            self.html.push('>');
        }
    }

    fn close_wrap_unless_continued(&mut self, line: &str) {
        if let Some(wrap) = self.wrap {
            if !line.starts_with(wrap.prefix) {
                self.wrap = None;
                self.close(wrap);
            }
        }
    }

    fn close(&mut self, wrap: Wrap) {
        self.html.push_str("\n    </");
        self.html.push_str(wrap.tag);
        self.html.push('>');
    }

    fn close_paragraph(&mut self) {
        if self.open_paragraph {
            self.open_paragraph = false;
            self.html.push_str("\n  </p>");
        }
    }

    /// Apply the effect of the blank lines seen since the last non-blank
    /// line: one ends the paragraph, two or more also end the outer block.
    fn flush_blank_lines(&mut self) {
        if self.blank_lines >= 1 && self.open_paragraph {
            self.open_paragraph = false;
            self.html.push_str("\n  </p>\n");
        }
        if self.blank_lines >= 2 {
            self.html.push_str("\n</div>");
            self.open_block = false;
        }
        self.blank_lines = 0;
    }
}
