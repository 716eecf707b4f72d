//! Sample View and platform files written into a converted project

pub mod templates;

use crate::project::Platform;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub use templates::{TemplateFile, APP_VIEW, DOM_BOILERPLATE, GITIGNORE_BLOCK};

/// Entry point of a create-react-app project
const DOM_INDEX: &str = "src/index.js";
const DOM_APP_IMPORT: &str = "./App";
const DOM_LOGIC_IMPORT: &str = "./Main/App.view.logic.js";

/// Paths touched while bootstrapping, relative to the project root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub written: Vec<String>,
    pub modified: Vec<String>,
    pub removed: Vec<String>,
}

/// Write the sample View and platform files into `project_dir`
pub async fn bootstrap(project_dir: &Path, platform: Platform) -> Result<BootstrapReport> {
    let main_dir = project_dir.join("src").join("Main");
    fs::create_dir_all(&main_dir)
        .await
        .with_context(|| format!("Failed to create directory: {}", main_dir.display()))?;

    let mut report = BootstrapReport::default();

    if platform == Platform::Dom {
        point_index_at_logic(project_dir).await?;
        report.modified.push(DOM_INDEX.to_string());

        for file in DOM_BOILERPLATE {
            if fs::remove_file(project_dir.join(file)).await.is_ok() {
                report.removed.push(file.to_string());
            }
        }
    }

    for file in templates::platform_files(platform) {
        write_template(project_dir, file).await?;
        report.written.push(file.path.to_string());
    }

    append_gitignore(project_dir).await?;
    report.modified.push(".gitignore".to_string());

    write_template(project_dir, &APP_VIEW).await?;
    report.written.push(APP_VIEW.path.to_string());

    Ok(report)
}

async fn write_template(project_dir: &Path, file: &TemplateFile) -> Result<()> {
    let target_path = project_dir.join(file.path);
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(&target_path, file.contents)
        .await
        .with_context(|| format!("Failed to write file: {}", target_path.display()))
}

/// Make src/index.js render the Views logic component instead of the stock App
async fn point_index_at_logic(project_dir: &Path) -> Result<()> {
    let index_path = project_dir.join(DOM_INDEX);
    let index = fs::read_to_string(&index_path)
        .await
        .with_context(|| format!("Failed to read {}", index_path.display()))?;

    fs::write(&index_path, rewrite_app_import(&index))
        .await
        .with_context(|| format!("Failed to write file: {}", index_path.display()))
}

/// Replace the first `./App` reference only
fn rewrite_app_import(index: &str) -> String {
    index.replacen(DOM_APP_IMPORT, DOM_LOGIC_IMPORT, 1)
}

async fn append_gitignore(project_dir: &Path) -> Result<()> {
    let path = project_dir.join(".gitignore");
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    file.write_all(GITIGNORE_BLOCK.as_bytes())
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;

    const CRA_INDEX: &str = "import React from 'react';\n\
        import ReactDOM from 'react-dom';\n\
        import './index.css';\n\
        import App from './App';\n\
        import registerServiceWorker from './registerServiceWorker';\n\
        \n\
        ReactDOM.render(<App />, document.getElementById('root'));\n";

    fn cra_project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        stdfs::create_dir_all(&src).unwrap();
        stdfs::write(src.join("index.js"), CRA_INDEX).unwrap();
        stdfs::write(src.join("index.css"), "body { margin: 0; }").unwrap();
        for file in ["App.css", "App.js", "App.test.js", "logo.svg"] {
            stdfs::write(src.join(file), "boilerplate").unwrap();
        }
        stdfs::write(dir.path().join(".gitignore"), "/node_modules").unwrap();
        dir
    }

    #[test]
    fn test_rewrite_first_app_import_only() {
        let out = rewrite_app_import("import App from './App'\n// ./App again\n");
        assert_eq!(
            out,
            "import App from './Main/App.view.logic.js'\n// ./App again\n"
        );
    }

    #[tokio::test]
    async fn test_bootstrap_dom_project() {
        let dir = cra_project();
        let root = dir.path();

        let report = bootstrap(root, Platform::Dom).await.unwrap();

        let index = stdfs::read_to_string(root.join("src/index.js")).unwrap();
        assert!(index.contains("import App from './Main/App.view.logic.js';"));
        assert!(index.contains("import './index.css';"));

        for file in DOM_BOILERPLATE {
            assert!(!root.join(file).exists(), "{} should be removed", file);
        }
        assert_eq!(report.removed.len(), DOM_BOILERPLATE.len());

        let css = stdfs::read_to_string(root.join("src/index.css")).unwrap();
        assert!(css.contains(".views-block"));
        assert!(root.join("src/Main/App.view.logic.js").exists());
        assert_eq!(
            stdfs::read_to_string(root.join("src/Main/App.view")).unwrap(),
            APP_VIEW.contents
        );

        let gitignore = stdfs::read_to_string(root.join(".gitignore")).unwrap();
        assert_eq!(gitignore, format!("/node_modules{}", GITIGNORE_BLOCK));

        assert!(!root.join("App.js").exists());
        assert!(report.written.contains(&"src/Main/App.view".to_string()));
        assert!(report.modified.contains(&"src/index.js".to_string()));
    }

    #[tokio::test]
    async fn test_bootstrap_dom_tolerates_missing_boilerplate() {
        let dir = cra_project();
        stdfs::remove_file(dir.path().join("src/logo.svg")).unwrap();
        stdfs::remove_file(dir.path().join("src/App.test.js")).unwrap();

        let report = bootstrap(dir.path(), Platform::Dom).await.unwrap();
        assert_eq!(report.removed, ["src/App.css", "src/App.js"]);
    }

    #[tokio::test]
    async fn test_bootstrap_dom_requires_index() {
        let dir = tempfile::tempdir().unwrap();
        let err = bootstrap(dir.path(), Platform::Dom).await.unwrap_err();
        assert!(err.to_string().contains("index.js"));
    }

    #[tokio::test]
    async fn test_bootstrap_native_project() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        stdfs::write(root.join("App.js"), "export default () => null").unwrap();

        let report = bootstrap(root, Platform::Native).await.unwrap();

        assert_eq!(
            report.written,
            [
                "App.js",
                "src/Main/App.view.logic.js",
                "src/fonts.js",
                "src/Main/App.view"
            ]
        );
        assert!(report.removed.is_empty());

        let app = stdfs::read_to_string(root.join("App.js")).unwrap();
        assert!(app.starts_with("import App from './src/Main/App.view.logic.js'"));

        let logic = stdfs::read_to_string(root.join("src/Main/App.view.logic.js")).unwrap();
        assert!(logic.contains("Font.loadAsync(fonts)"));
        assert!(root.join("src/fonts.js").exists());

        // .gitignore is created when missing
        let gitignore = stdfs::read_to_string(root.join(".gitignore")).unwrap();
        assert_eq!(gitignore, GITIGNORE_BLOCK);
    }

    #[tokio::test]
    async fn test_bootstrap_is_fine_with_existing_src() {
        let dir = tempfile::tempdir().unwrap();
        stdfs::create_dir_all(dir.path().join("src/Main")).unwrap();

        bootstrap(dir.path(), Platform::Native).await.unwrap();
        assert!(dir.path().join("src/Main/App.view").exists());
    }
}
