//! Package registry lookups
//!
//! Versions come from either:
//! - Remote: an npm-compatible registry (abbreviated metadata documents)
//! - Local: a directory mirroring those documents as `<package>.json` files
//!
//! Both sources read the same document shape and pick `dist-tags.latest`.

pub mod error;

pub use error::RegistryError;

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use url::Url;

/// Abbreviated metadata media type; much smaller than the full document
const ABBREVIATED_METADATA: &str = "application/vnd.npm.install-v1+json";

/// Registry source - either remote URL or local mirror directory
#[derive(Debug, Clone)]
pub enum RegistrySource {
    Remote(Url),
    Local(PathBuf),
}

impl RegistrySource {
    /// Create a remote registry source from a product config, honouring the env override
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.registry_url_env())
            .unwrap_or_else(|_| config.default_registry_url().to_string());
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid registry URL: {}", url_str))?;
        Ok(Self::Remote(url))
    }

    /// Create a local registry source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

#[derive(Debug, Deserialize)]
struct PackageDocument {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
}

/// A package name paired with its latest published version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersion {
    pub name: String,
    pub version: semver::Version,
}

/// Registry client - looks up latest versions from a remote or local source
pub struct RegistryClient {
    source: RegistrySource,
    client: reqwest::Client,
}

impl RegistryClient {
    /// Create a new client with a custom user agent
    pub fn new(source: RegistrySource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a client from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let source = RegistrySource::from_config(config)?;
        Ok(Self::new(source, config.user_agent()))
    }

    /// Create a client reading a local mirror
    pub fn from_local(path: PathBuf, user_agent: &str) -> Self {
        Self::new(RegistrySource::local(path), user_agent)
    }

    /// Document URL for a package; scoped names keep their slash encoded (`@scope%2Fname`)
    fn package_url(base: &Url, package: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
            .pop_if_empty()
            .push(package);
        Ok(url)
    }

    async fn fetch_document(&self, package: &str) -> Result<PackageDocument> {
        match &self.source {
            RegistrySource::Remote(base_url) => {
                let url = Self::package_url(base_url, package)?;
                let response = self
                    .client
                    .get(url)
                    .header(reqwest::header::ACCEPT, ABBREVIATED_METADATA)
                    .send()
                    .await
                    .map_err(|source| RegistryError::Request {
                        package: package.to_string(),
                        source,
                    })?;

                if !response.status().is_success() {
                    return Err(RegistryError::Status {
                        package: package.to_string(),
                        status: response.status(),
                    }
                    .into());
                }

                let body = response
                    .bytes()
                    .await
                    .map_err(|source| RegistryError::Request {
                        package: package.to_string(),
                        source,
                    })?;
                Ok(decode(package, &body)?)
            }
            RegistrySource::Local(dir) => {
                let path = dir.join(format!("{}.json", package));
                let body = tokio::fs::read(&path)
                    .await
                    .map_err(|source| RegistryError::Io {
                        package: package.to_string(),
                        path: path.display().to_string(),
                        source,
                    })?;
                Ok(decode(package, &body)?)
            }
        }
    }

    /// Latest published version of a package
    pub async fn latest_version(&self, package: &str) -> Result<semver::Version> {
        let document = self.fetch_document(package).await?;
        let latest = document
            .dist_tags
            .get("latest")
            .ok_or_else(|| RegistryError::MissingLatest {
                package: package.to_string(),
            })?;

        let cleaned = latest.strip_prefix('v').unwrap_or(latest);
        let version =
            semver::Version::parse(cleaned).map_err(|source| RegistryError::InvalidVersion {
                package: package.to_string(),
                version: latest.clone(),
                source,
            })?;
        Ok(version)
    }

    /// Look up every package concurrently. Results keep the order of `packages`;
    /// the first failure fails the batch.
    pub async fn latest_versions(&self, packages: &[&str]) -> Result<Vec<PackageVersion>> {
        let lookups = packages.iter().map(|&name| async move {
            let version = self.latest_version(name).await?;
            Ok::<_, anyhow::Error>(PackageVersion {
                name: name.to_string(),
                version,
            })
        });

        try_join_all(lookups).await
    }
}

fn decode(package: &str, body: &[u8]) -> Result<PackageDocument, RegistryError> {
    serde_json::from_slice(body).map_err(|source| RegistryError::Decode {
        package: package.to_string(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;

    /// Write a registry document for `package` into a local mirror
    pub fn publish(dir: &Path, package: &str, latest: &str) {
        let path = dir.join(format!("{}.json", package));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let doc = serde_json::json!({
            "name": package,
            "dist-tags": { "latest": latest },
            "versions": { latest: {} }
        });
        std::fs::write(path, doc.to_string()).unwrap();
    }
}
