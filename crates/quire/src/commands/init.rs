//! Initialize a quire project.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Files written by `quire init`, relative to the project directory.
const DEFAULT_FILES: [(&str, &str); 4] = [
    ("index.md", DEFAULT_INDEX),
    ("404.md", DEFAULT_NOT_FOUND),
    ("main.html", DEFAULT_TEMPLATE),
    ("config.json", DEFAULT_CONFIG),
];

/// Directories created by `quire init`.
const DEFAULT_DIRS: [&str; 3] = ["pages", "resources", "output"];

/// Run the init command.
pub fn run(dir: &Path) -> Result<()> {
    tracing::info!("Initializing quire project in {}", dir.display());

    // Refuse before writing anything
    for (name, _) in DEFAULT_FILES {
        let path = dir.join(name);
        if path.exists() {
            bail!("{} already exists, refusing to overwrite it", path.display());
        }
    }

    for (name, content) in DEFAULT_FILES {
        let path = dir.join(name);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", name))?;
        tracing::info!("Created {}", name);
    }

    for name in DEFAULT_DIRS {
        fs::create_dir_all(dir.join(name))
            .with_context(|| format!("Failed to create {} directory", name))?;
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Add pages with 'quire create --name <NAME>' inside pages/, then run 'quire build'.");

    Ok(())
}

const DEFAULT_INDEX: &str = "# Welcome

This site is built with **quire**.
";

const DEFAULT_NOT_FOUND: &str = "# Not found

The page you are looking for does not exist.
";

const DEFAULT_TEMPLATE: &str = "<!DOCTYPE html>
<html>
<head>
  <meta charset='utf-8'>
  <title>{{var:title}}</title>
  <base href='{{var:base}}'>
</head>
<body>
  <nav>
    {{nav:/}}
  </nav>
  <main>
{{render:content}}
  </main>
</body>
</html>
";

const DEFAULT_CONFIG: &str = r#"{
  "pagesPath": "pages",
  "resourcesPath": "resources",
  "buildPath": "output",
  "mainFile": "main.html",
  "indexFile": "index.md",
  "404File": "404.md",
  "title": "My Site",
  "base": "/"
}
"#;
