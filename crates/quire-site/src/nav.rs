//! Navigation list rendering for page groups.

use crate::page::{Page, PageKind};
use crate::tree::{PageGroup, ROOT};

/// Render `group` as an unordered list.
///
/// `indent` is the column the `{{nav:...}}` marker sat at, so the list lines
/// up with the template around it. An entry is marked active only when both
/// its filename and its group match the page being rendered; identical
/// filenames in different directories stay distinct.
pub fn render_nav(
    group: &PageGroup,
    indent: usize,
    current: &Page,
    current_group: Option<&str>,
) -> String {
    if group.entries.is_empty() {
        return String::new();
    }

    let spacing = " ".repeat(indent);
    let mut nav = String::from("<ul>");

    for page in &group.entries {
        nav.push('\n');
        nav.push_str(&spacing);

        if page.kind == PageKind::Link {
            nav.push_str(&format!(
                "  <li><a href='{}' target='_blank'>{}</a></li>",
                page.content.trim(),
                page.name
            ));
        } else {
            let active = page.filename == current.filename
                && current_group == Some(group.identity.as_str());
            nav.push_str(&format!(
                "  <li{}><a href='{}'>{}</a></li>",
                if active { " class='active'" } else { "" },
                internal_url(&group.identity, page),
                page.name
            ));
        }
    }

    nav.push('\n');
    nav.push_str(&spacing);
    nav.push_str("</ul>");
    nav
}

/// Relative URL of a page inside a group: `About.html` for the root group,
/// `blog/First_Post.html` for `/blog`.
pub fn internal_url(identity: &str, page: &Page) -> String {
    if identity == ROOT {
        page.output_filename()
    } else {
        format!(
            "{}/{}",
            identity.trim_start_matches('/'),
            page.output_filename()
        )
    }
}
