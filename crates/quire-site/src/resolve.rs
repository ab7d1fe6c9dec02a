//! Marker resolution and substitution.
//!
//! | marker              | resolves to                                    |
//! |---------------------|------------------------------------------------|
//! | `{{var:NAME}}`      | the site variable `NAME` (`title`, `base`)     |
//! | `{{nav:/PATH}}`     | a `<ul>` for the page group at `/PATH`         |
//! | `{{render:content}}`| the page body (site template only)             |

use std::collections::HashMap;

use crate::markers::Marker;
use crate::nav::render_nav;
use crate::page::Page;
use crate::tree::PageTree;

/// Everything a marker can be resolved against.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub variables: &'a HashMap<String, String>,
    pub tree: &'a PageTree,
    /// The rendered page body. `None` while resolving a page's own markers,
    /// where `render` markers are not allowed.
    pub content: Option<&'a str>,
    /// The page being rendered
    pub page: &'a Page,
    /// Identity of the group the page belongs to, `None` for pages outside
    /// the tree (index, 404)
    pub group: Option<&'a str>,
}

/// Errors raised when a marker cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Tried to render non-existing page group '{0}'")]
    UnknownGroup(String),

    #[error("Tried to render non-existing variable '{0}'")]
    UnknownVariable(String),

    #[error("Unknown render target '{0}', only 'content' can be rendered")]
    UnknownRenderTarget(String),

    #[error("'{{{{render:{0}}}}}' can only be used in the site template")]
    RenderOutsideTemplate(String),

    #[error("Unknown marker type '{0}'")]
    UnknownKind(String),
}

/// Produce the substitution text for one marker.
pub fn resolve(marker: &Marker, ctx: &ResolveContext<'_>) -> Result<String, ResolveError> {
    match marker.kind.as_str() {
        "nav" => {
            let group = ctx
                .tree
                .get(&marker.value)
                .ok_or_else(|| ResolveError::UnknownGroup(marker.value.clone()))?;
            Ok(render_nav(group, marker.indent, ctx.page, ctx.group))
        }
        "var" => ctx
            .variables
            .get(&marker.value)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownVariable(marker.value.clone())),
        "render" => {
            let content = ctx
                .content
                .ok_or_else(|| ResolveError::RenderOutsideTemplate(marker.value.clone()))?;
            if marker.value == "content" {
                Ok(content.to_string())
            } else {
                Err(ResolveError::UnknownRenderTarget(marker.value.clone()))
            }
        }
        other => Err(ResolveError::UnknownKind(other.to_string())),
    }
}

/// Resolve `markers` in order and replace every occurrence of each
/// placeholder in `text`.
///
/// Replacement is global and literal, so identical placeholders all receive
/// the value computed for the first of them.
pub fn substitute_markers(
    text: &str,
    markers: &[Marker],
    ctx: &ResolveContext<'_>,
) -> Result<String, ResolveError> {
    let mut output = text.to_string();
    for marker in markers {
        let value = resolve(marker, ctx)?;
        output = output.replace(&marker.placeholder(), &value);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::extract_markers;
    use crate::page::PageKind;
    use crate::tree::PageGroup;
    use std::path::PathBuf;

    fn page(filename: &str, url_name: &str) -> Page {
        Page {
            filename: filename.to_string(),
            url_name: url_name.to_string(),
            name: url_name.to_string(),
            source_path: PathBuf::from(filename),
            kind: PageKind::Markdown,
            content: String::new(),
            sequence: 1,
        }
    }

    fn variables() -> HashMap<String, String> {
        HashMap::from([
            ("title".to_string(), "My Site".to_string()),
            ("base".to_string(), "https://example.com/".to_string()),
        ])
    }

    fn tree() -> PageTree {
        PageTree::from_iter([
            PageGroup {
                identity: "/".to_string(),
                entries: vec![page("1.a.md", "a")],
            },
            PageGroup {
                identity: "/blog".to_string(),
                entries: vec![page("1.a.md", "a")],
            },
        ])
    }

    fn marker(raw: &str) -> Marker {
        extract_markers(raw).unwrap().remove(0)
    }

    #[test]
    fn resolves_variables() {
        let (vars, tree, current) = (variables(), tree(), page("1.a.md", "a"));
        let ctx = ResolveContext {
            variables: &vars,
            tree: &tree,
            content: None,
            page: &current,
            group: Some("/"),
        };

        assert_eq!(resolve(&marker("{{var:title}}"), &ctx).unwrap(), "My Site");
        assert_eq!(
            resolve(&marker("{{var:author}}"), &ctx),
            Err(ResolveError::UnknownVariable("author".to_string()))
        );
    }

    #[test]
    fn resolves_navigation() {
        let (vars, tree, current) = (variables(), tree(), page("1.a.md", "a"));
        let ctx = ResolveContext {
            variables: &vars,
            tree: &tree,
            content: Some(""),
            page: &current,
            group: Some("/blog"),
        };

        let root_nav = resolve(&marker("{{nav:/}}"), &ctx).unwrap();
        let blog_nav = resolve(&marker("{{nav:/blog}}"), &ctx).unwrap();

        assert_eq!(root_nav, "<ul>\n  <li><a href='a.html'>a</a></li>\n</ul>");
        assert_eq!(
            blog_nav,
            "<ul>\n  <li class='active'><a href='blog/a.html'>a</a></li>\n</ul>"
        );
        assert_eq!(
            resolve(&marker("{{nav:/docs}}"), &ctx),
            Err(ResolveError::UnknownGroup("/docs".to_string()))
        );
    }

    #[test]
    fn render_only_in_template() {
        let (vars, tree, current) = (variables(), tree(), page("1.a.md", "a"));
        let mut ctx = ResolveContext {
            variables: &vars,
            tree: &tree,
            content: None,
            page: &current,
            group: Some("/"),
        };

        assert_eq!(
            resolve(&marker("{{render:content}}"), &ctx),
            Err(ResolveError::RenderOutsideTemplate("content".to_string()))
        );

        ctx.content = Some("<p>body</p>");
        assert_eq!(
            resolve(&marker("{{render:content}}"), &ctx).unwrap(),
            "<p>body</p>"
        );
        assert_eq!(
            resolve(&marker("{{render:sidebar}}"), &ctx),
            Err(ResolveError::UnknownRenderTarget("sidebar".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        let (vars, tree, current) = (variables(), tree(), page("1.a.md", "a"));
        let ctx = ResolveContext {
            variables: &vars,
            tree: &tree,
            content: None,
            page: &current,
            group: None,
        };

        assert_eq!(
            resolve(&marker("{{env:HOME}}"), &ctx),
            Err(ResolveError::UnknownKind("env".to_string()))
        );
    }

    #[test]
    fn substitutes_every_occurrence() {
        let (vars, tree, current) = (variables(), tree(), page("1.a.md", "a"));
        let ctx = ResolveContext {
            variables: &vars,
            tree: &tree,
            content: None,
            page: &current,
            group: Some("/"),
        };
        let text = "<h1>{{var:title}}</h1><footer>{{var:title}} at {{var:base}}</footer>";
        let markers = extract_markers(text).unwrap();

        let output = substitute_markers(text, &markers, &ctx).unwrap();

        assert_eq!(
            output,
            "<h1>My Site</h1><footer>My Site at https://example.com/</footer>"
        );
    }

    #[test]
    fn identical_nav_markers_share_first_indent() {
        let (vars, tree, current) = (variables(), tree(), page("1.a.md", "a"));
        let ctx = ResolveContext {
            variables: &vars,
            tree: &tree,
            content: None,
            page: &current,
            group: None,
        };
        let text = "  {{nav:/}}\n{{nav:/}}";
        let markers = extract_markers(text).unwrap();

        let output = substitute_markers(text, &markers, &ctx).unwrap();

        let nav = "<ul>\n    <li><a href='a.html'>a</a></li>\n  </ul>";
        assert_eq!(output, format!("  {nav}\n{nav}"));
    }
}
