//! Page rendering.
//!
//! A page is rendered in two passes. Its own content is converted (Markdown
//! only) and its markers are resolved; the result is then injected into the
//! site template through `{{render:content}}` while the template's remaining
//! markers are resolved against the same page. The template's markers are
//! parsed once and shared by every page.

use std::collections::HashMap;

use quire_markdown::convert;

use crate::markers::{extract_markers, Marker, MarkerError};
use crate::page::{Page, PageKind};
use crate::resolve::{substitute_markers, ResolveContext, ResolveError};
use crate::tree::PageTree;

/// Errors that can occur while rendering a page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to parse markers in site template: {0}")]
    TemplateMarkers(#[source] MarkerError),

    #[error("Failed to parse markers in page '{page}': {source}")]
    PageMarkers {
        page: String,
        #[source]
        source: MarkerError,
    },

    #[error("Failed to render page '{page}': {source}")]
    Resolve {
        page: String,
        #[source]
        source: ResolveError,
    },

    #[error("Page '{page}' has type '{kind}' which cannot be rendered, only md and html pages can")]
    UnsupportedKind { page: String, kind: PageKind },
}

/// Renders pages into the site template.
#[derive(Debug)]
pub struct PageRenderer<'a> {
    template: &'a str,
    template_markers: Vec<Marker>,
    variables: &'a HashMap<String, String>,
    tree: &'a PageTree,
}

impl<'a> PageRenderer<'a> {
    /// Create a renderer, parsing the template's markers.
    pub fn new(
        template: &'a str,
        variables: &'a HashMap<String, String>,
        tree: &'a PageTree,
    ) -> Result<Self, RenderError> {
        let template_markers = extract_markers(template).map_err(RenderError::TemplateMarkers)?;

        Ok(Self {
            template,
            template_markers,
            variables,
            tree,
        })
    }

    /// Render `page` as a complete document.
    ///
    /// `group` is the identity of the group the page was scanned into, used
    /// to highlight it in navigation; `None` for index and 404 pages.
    pub fn render(&self, page: &Page, group: Option<&str>) -> Result<String, RenderError> {
        let body = self.render_body(page, group)?;

        let ctx = ResolveContext {
            variables: self.variables,
            tree: self.tree,
            content: Some(&body),
            page,
            group,
        };

        substitute_markers(self.template, &self.template_markers, &ctx).map_err(|source| {
            RenderError::Resolve {
                page: page.filename.clone(),
                source,
            }
        })
    }

    /// The page's own content with its markers resolved.
    fn render_body(&self, page: &Page, group: Option<&str>) -> Result<String, RenderError> {
        let content = match page.kind {
            PageKind::Markdown => convert(&page.content),
            PageKind::Html => page.content.clone(),
            PageKind::Link => {
                return Err(RenderError::UnsupportedKind {
                    page: page.filename.clone(),
                    kind: page.kind,
                })
            }
        };

        let markers = extract_markers(&content).map_err(|source| RenderError::PageMarkers {
            page: page.filename.clone(),
            source,
        })?;

        let ctx = ResolveContext {
            variables: self.variables,
            tree: self.tree,
            content: None,
            page,
            group,
        };

        substitute_markers(&content, &markers, &ctx).map_err(|source| RenderError::Resolve {
            page: page.filename.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::PageGroup;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const TEMPLATE: &str = "<title>{{var:title}}</title>\n<nav>\n  {{nav:/}}\n</nav>\n<main>{{render:content}}</main>";

    fn page(filename: &str, url_name: &str, kind: PageKind, content: &str) -> Page {
        Page {
            filename: filename.to_string(),
            url_name: url_name.to_string(),
            name: url_name.to_string(),
            source_path: PathBuf::from(filename),
            kind,
            content: content.to_string(),
            sequence: 1,
        }
    }

    fn fixture() -> (HashMap<String, String>, PageTree) {
        let variables = HashMap::from([("title".to_string(), "Site".to_string())]);
        let tree = PageTree::from_iter([PageGroup {
            identity: "/".to_string(),
            entries: vec![
                page("1.Home.md", "Home", PageKind::Markdown, "# Welcome to {{var:title}}"),
                page("2.Raw.html", "Raw", PageKind::Html, "<p>raw</p>"),
            ],
        }]);
        (variables, tree)
    }

    #[test]
    fn renders_markdown_page_into_template() {
        let (variables, tree) = fixture();
        let renderer = PageRenderer::new(TEMPLATE, &variables, &tree).unwrap();
        let home = &tree.get("/").unwrap().entries[0];

        let html = renderer.render(home, Some("/")).unwrap();

        assert_eq!(
            html,
            "<title>Site</title>\n<nav>\n  <ul>\n    <li class='active'><a href='Home.html'>Home</a></li>\n    <li><a href='Raw.html'>Raw</a></li>\n  </ul>\n</nav>\n<main><div>\n  <h1>Welcome to Site</h1>\n</div></main>"
        );
    }

    #[test]
    fn html_pages_pass_through() {
        let (variables, tree) = fixture();
        let renderer = PageRenderer::new(TEMPLATE, &variables, &tree).unwrap();
        let raw = &tree.get("/").unwrap().entries[1];

        let html = renderer.render(raw, Some("/")).unwrap();

        assert!(html.contains("<main><p>raw</p></main>"));
        assert!(html.contains("<li class='active'><a href='Raw.html'>Raw</a></li>"));
    }

    #[test]
    fn link_pages_cannot_be_rendered() {
        let (variables, tree) = fixture();
        let renderer = PageRenderer::new(TEMPLATE, &variables, &tree).unwrap();
        let link = page("3.GitHub.link", "GitHub", PageKind::Link, "https://github.com");

        let result = renderer.render(&link, Some("/"));

        assert!(matches!(
            result,
            Err(RenderError::UnsupportedKind {
                kind: PageKind::Link,
                ..
            })
        ));
    }

    #[test]
    fn render_marker_in_page_is_rejected() {
        let (variables, tree) = fixture();
        let renderer = PageRenderer::new(TEMPLATE, &variables, &tree).unwrap();
        let sneaky = page("4.Sneaky.html", "Sneaky", PageKind::Html, "{{render:content}}");

        let result = renderer.render(&sneaky, Some("/"));

        assert!(matches!(
            result,
            Err(RenderError::Resolve {
                source: ResolveError::RenderOutsideTemplate(_),
                ..
            })
        ));
    }

    #[test]
    fn malformed_template_fails_early() {
        let (variables, tree) = fixture();
        let result = PageRenderer::new("<title>{{var:title</title>", &variables, &tree);
        assert!(matches!(
            result,
            Err(RenderError::TemplateMarkers(MarkerError::Unclosed { line: 1 }))
        ));
    }

    #[test]
    fn malformed_page_marker_names_the_page() {
        let (variables, tree) = fixture();
        let renderer = PageRenderer::new(TEMPLATE, &variables, &tree).unwrap();
        let broken = page("5.Broken.html", "Broken", PageKind::Html, "{{oops}}");

        let err = renderer.render(&broken, Some("/")).unwrap_err();

        assert!(err.to_string().contains("5.Broken.html"));
    }

    #[test]
    fn pages_outside_tree_have_no_active_entry() {
        let (variables, tree) = fixture();
        let renderer = PageRenderer::new(TEMPLATE, &variables, &tree).unwrap();
        let index = page("index.md", "index", PageKind::Markdown, "hello");

        let html = renderer.render(&index, None).unwrap();

        assert!(!html.contains("active"));
    }
}
