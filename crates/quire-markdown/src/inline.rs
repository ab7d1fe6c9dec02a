//! Inline substitutions: images, links, bold and italic.
//!
//! The passes run in a fixed order over a single line and each one replaces
//! every match, not just the first. Later passes see the output of earlier
//! ones, so the order is part of the output format: an underscore inside a
//! link URL produced by the link pass can still be picked up by the italic
//! pass.

use regex::Regex;
use std::sync::LazyLock;

static IMAGE_TITLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[([^\]]*)\]\(([^\]]*)\s"(.*)"\)"#).expect("Invalid titled image regex")
});

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^\]]*)\)").expect("Invalid image regex"));

static LINK_TITLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[([^\]]+)\]\(([^\]]*)\s"(.*)"\)"#).expect("Invalid titled link regex")
});

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^\]]*)\)").expect("Invalid link regex"));

static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("Invalid bold regex"));

static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").expect("Invalid bold regex"));

static ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("Invalid italic regex"));

static ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.+?)_").expect("Invalid italic regex"));

/// One substitution pass: a pattern and its replacement template.
struct Pass {
    pattern: &'static LazyLock<Regex>,
    replacement: &'static str,
}

/// All passes in application order. Within each construct the titled
/// variant comes first so the plain pattern never eats half of it.
static PASSES: [Pass; 8] = [
    Pass {
        pattern: &IMAGE_TITLED,
        replacement: "<img src='${2}' alt='${1}' title='${3}'/>",
    },
    Pass {
        pattern: &IMAGE,
        replacement: "<img src='${2}' alt='${1}'/>",
    },
    Pass {
        pattern: &LINK_TITLED,
        replacement: "<a href='${2}' title='${3}'>${1}</a>",
    },
    Pass {
        pattern: &LINK,
        replacement: "<a href='${2}'>${1}</a>",
    },
    Pass {
        pattern: &BOLD_STARS,
        replacement: "<b>${1}</b>",
    },
    Pass {
        pattern: &BOLD_UNDERSCORES,
        replacement: "<b>${1}</b>",
    },
    Pass {
        pattern: &ITALIC_STAR,
        replacement: "<i>${1}</i>",
    },
    Pass {
        pattern: &ITALIC_UNDERSCORE,
        replacement: "<i>${1}</i>",
    },
];

/// Apply every inline substitution to `line`.
pub fn substitute(line: &str) -> String {
    PASSES.iter().fold(line.to_string(), |text, pass| {
        pass.pattern
            .replace_all(&text, pass.replacement)
            .into_owned()
    })
}
