//! package.json loading, editing and writing

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const FILE_NAME: &str = "package.json";

const DEPENDENCIES: &str = "dependencies";
const DEV_DEPENDENCIES: &str = "devDependencies";
const SCRIPTS: &str = "scripts";

/// An order-preserving view over a project's package.json
///
/// Keys keep the order they had on disk; new keys are appended, so a rewrite only
/// shows the additions in a diff.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageJson {
    root: Map<String, Value>,
}

impl PackageJson {
    /// Path of package.json inside a project directory
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(FILE_NAME)
    }

    /// Wrap a parsed document. An empty `devDependencies` object is added when missing.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(root) = value else {
            anyhow::bail!("{} must contain a JSON object", FILE_NAME);
        };

        let mut pkg = Self { root };
        pkg.section_mut(DEV_DEPENDENCIES)?;
        Ok(pkg)
    }

    /// Parse package.json text
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).with_context(|| format!("Failed to parse {}", FILE_NAME))?;
        Self::from_value(value)
    }

    /// Load `<dir>/package.json`. Returns `Ok(None)` when the file does not exist.
    pub async fn load(dir: &Path) -> Result<Option<Self>> {
        let path = Self::path_in(dir);
        let exists = fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to check {}", path.display()))?;
        if !exists {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).map(Some)
    }

    /// Serialize the same way `JSON.stringify(pkg, null, 2)` does
    pub fn to_pretty_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root).context("Failed to serialize package.json")
    }

    /// Write to `<dir>/package.json`
    pub async fn save(&self, dir: &Path) -> Result<()> {
        let path = Self::path_in(dir);
        let content = self.to_pretty_string()?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn section(&self, key: &str) -> Option<&Map<String, Value>> {
        self.root.get(key).and_then(Value::as_object)
    }

    fn section_mut(&mut self, key: &str) -> Result<&mut Map<String, Value>> {
        self.root
            .entry(key)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| anyhow::anyhow!("\"{}\" in {} is not an object", key, FILE_NAME))
    }

    /// Check `dependencies` (a missing section counts as empty)
    pub fn has_dependency(&self, name: &str) -> bool {
        self.section(DEPENDENCIES)
            .is_some_and(|deps| deps.contains_key(name))
    }

    pub fn has_dev_dependency(&self, name: &str) -> bool {
        self.section(DEV_DEPENDENCIES)
            .is_some_and(|deps| deps.contains_key(name))
    }

    /// Add or replace a dependency with a caret range on `version`
    pub fn add_dependency(&mut self, name: &str, version: &semver::Version) -> Result<()> {
        self.section_mut(DEPENDENCIES)?
            .insert(name.to_string(), Value::String(format!("^{}", version)));
        Ok(())
    }

    pub fn add_dev_dependency(&mut self, name: &str, version: &semver::Version) -> Result<()> {
        self.section_mut(DEV_DEPENDENCIES)?
            .insert(name.to_string(), Value::String(format!("^{}", version)));
        Ok(())
    }

    /// Version range of a dependency, looking in both dependency sections
    pub fn dependency_range(&self, name: &str) -> Option<&str> {
        [DEPENDENCIES, DEV_DEPENDENCIES]
            .iter()
            .filter_map(|section| self.section(section))
            .find_map(|deps| deps.get(name))
            .and_then(Value::as_str)
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.section(SCRIPTS)
            .and_then(|scripts| scripts.get(name))
            .and_then(Value::as_str)
    }

    pub fn set_script(&mut self, name: &str, command: impl Into<String>) -> Result<()> {
        self.section_mut(SCRIPTS)?
            .insert(name.to_string(), Value::String(command.into()));
        Ok(())
    }

    /// Copy script `from` into `to`. When `from` is not defined, `to` is removed.
    pub fn copy_script(&mut self, from: &str, to: &str) -> Result<()> {
        match self.script(from).map(str::to_string) {
            Some(command) => self.set_script(to, command),
            None => {
                if let Some(scripts) = self.root.get_mut(SCRIPTS).and_then(Value::as_object_mut) {
                    scripts.shift_remove(to);
                }
                Ok(())
            }
        }
    }
}
