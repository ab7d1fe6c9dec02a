use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use quire_site::{ConfigValues, PageOrder, SiteBuilder, SiteConfig};
use tempfile::tempdir;
use walkdir::WalkDir;

const TEMPLATE: &str = "<!DOCTYPE html>
<html>
<head>
  <title>{{var:title}}</title>
  <base href='{{var:base}}'>
</head>
<body>
  <nav>
    {{nav:/}}
  </nav>
  <aside>
    {{nav:/guide}}
  </aside>
  <main>
{{render:content}}
  </main>
</body>
</html>
";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn scaffold(root: &Path, pages: &str, build: &str) -> SiteConfig {
    write(root, "main.html", TEMPLATE);
    write(root, "index.md", "# Welcome\n\nStart with the [guide](guide/Install.html).");
    write(root, "404.md", "Nothing here.");
    write(root, "resources/site.css", "main { margin: 0 auto; }");
    write(root, "resources/fonts/body.woff", "woff");

    let pages_dir = root.join(pages);
    write(&pages_dir, "1.Home.md", "# Home\n\nSee {{var:title}}.");
    write(&pages_dir, "2.About Us.html", "<p>About</p>");
    write(&pages_dir, "3.Source.link", "https://example.com/quire\n");
    write(&pages_dir, "logo.svg", "<svg/>");
    write(
        &pages_dir,
        "guide/1.Install.md",
        "## Install\n\n```sh\ncargo install quire\n```\n\n- fast\n- small",
    );
    write(&pages_dir, "guide/2.Usage.md", "> read the docs\n> carefully");
    write(&pages_dir, "guide/1.Home.md", "guide home");

    let values = ConfigValues::from_iter([
        ("pagesPath", pages),
        ("resourcesPath", "resources"),
        ("buildPath", build),
        ("mainFile", "main.html"),
        ("indexFile", "index.md"),
        ("404File", "404.md"),
        ("title", "Quire"),
        ("base", "/"),
    ]);
    SiteConfig::from_values(&values, root).unwrap()
}

/// Every file under `dir`, keyed by relative path.
fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(dir)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(dir).unwrap().to_path_buf();
            (relative, fs::read(entry.path()).unwrap())
        })
        .collect()
}

#[test]
fn builds_complete_site() {
    let temp = tempdir().unwrap();
    let config = scaffold(temp.path(), "pages", "output");
    let out = temp.path().join("output");

    let result = SiteBuilder::new(config).build().unwrap();

    assert_eq!(result.pages, 7);
    assert_eq!(result.groups, 2);
    assert_eq!(result.output_dir, out);

    let files: Vec<_> = snapshot(&out).into_keys().collect();
    assert_eq!(
        files,
        [
            "404.html",
            "About_Us.html",
            "Home.html",
            "guide/Home.html",
            "guide/Install.html",
            "guide/Usage.html",
            "index.html",
            "logo.svg",
            "resources/fonts/body.woff",
            "resources/site.css",
        ]
        .map(PathBuf::from)
    );
}

#[test]
fn renders_guide_page() {
    let temp = tempdir().unwrap();
    let config = scaffold(temp.path(), "pages", "output");

    SiteBuilder::new(config).build().unwrap();

    let html = fs::read_to_string(temp.path().join("output/guide/Install.html")).unwrap();
    assert_eq!(
        html,
        "<!DOCTYPE html>
<html>
<head>
  <title>Quire</title>
  <base href='/'>
</head>
<body>
  <nav>
    <ul>
      <li><a href='Home.html'>Home</a></li>
      <li><a href='About_Us.html'>About Us</a></li>
      <li><a href='https://example.com/quire' target='_blank'>Source</a></li>
    </ul>
  </nav>
  <aside>
    <ul>
      <li><a href='guide/Home.html'>Home</a></li>
      <li class='active'><a href='guide/Install.html'>Install</a></li>
      <li><a href='guide/Usage.html'>Usage</a></li>
    </ul>
  </aside>
  <main>
<div>
  <h2>Install</h2>
    <pre><code class='language-sh'>cargo install quire
    </code></pre>

    <ul>
      <li>fast</li>
      <li>small</li>
    </ul>
</div>
  </main>
</body>
</html>
"
    );
}

#[test]
fn same_filename_is_active_only_in_its_own_group() {
    let temp = tempdir().unwrap();
    let config = scaffold(temp.path(), "pages", "output");

    SiteBuilder::new(config).build().unwrap();

    let root_home = fs::read_to_string(temp.path().join("output/Home.html")).unwrap();
    assert!(root_home.contains("<li class='active'><a href='Home.html'>Home</a></li>"));
    assert!(root_home.contains("<li><a href='guide/Home.html'>Home</a></li>"));

    let guide_home = fs::read_to_string(temp.path().join("output/guide/Home.html")).unwrap();
    assert!(guide_home.contains("<li><a href='Home.html'>Home</a></li>"));
    assert!(guide_home.contains("<li class='active'><a href='guide/Home.html'>Home</a></li>"));
}

#[test]
fn index_and_not_found_pages() {
    let temp = tempdir().unwrap();
    let config = scaffold(temp.path(), "pages", "output");

    SiteBuilder::new(config).build().unwrap();

    let index = fs::read_to_string(temp.path().join("output/index.html")).unwrap();
    assert!(index.contains("<h1>Welcome</h1>"));
    assert!(index.contains("<a href='guide/Install.html'>guide</a>"));
    assert!(!index.contains("class='active'"));

    let not_found = fs::read_to_string(temp.path().join("output/404.html")).unwrap();
    assert!(not_found.contains("Nothing here."));
}

#[test]
fn rebuild_is_byte_identical() {
    let temp = tempdir().unwrap();
    let config = scaffold(temp.path(), "pages", "output");
    let out = temp.path().join("output");

    SiteBuilder::new(config.clone()).build().unwrap();
    let first = snapshot(&out);
    SiteBuilder::new(config).build().unwrap();
    let second = snapshot(&out);

    assert_eq!(first, second);
}

#[test]
fn rebuild_with_output_inside_pages() {
    let temp = tempdir().unwrap();
    let config = scaffold(temp.path(), "site", "site/output");
    let out = temp.path().join("site/output");

    let first_result = SiteBuilder::new(config.clone()).build().unwrap();
    let first = snapshot(&out);
    let second_result = SiteBuilder::new(config).build().unwrap();
    let second = snapshot(&out);

    assert_eq!(first_result.pages, second_result.pages);
    assert_eq!(first, second);
    assert!(!out.join("output").exists());
}

#[test]
fn sequence_order_reorders_navigation() {
    let temp = tempdir().unwrap();
    let mut config = scaffold(temp.path(), "pages", "output");
    write(&temp.path().join("pages"), "10.Changelog.md", "changes");
    config.page_order = PageOrder::Sequence;

    SiteBuilder::new(config).build().unwrap();

    let home = fs::read_to_string(temp.path().join("output/Home.html")).unwrap();
    let source = home.find("Source</a>").unwrap();
    let changelog = home.find("Changelog</a>").unwrap();
    assert!(source < changelog);
}
