//! Errors raised while looking up package versions

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to fetch '{package}' from the registry: {source}")]
    Request {
        package: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Registry returned HTTP {status} for '{package}'")]
    Status {
        package: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to read registry metadata for '{package}' from {path}: {source}")]
    Io {
        package: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid registry metadata for '{package}': {source}")]
    Decode {
        package: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Package '{package}' has no \"latest\" dist-tag")]
    MissingLatest { package: String },

    #[error("Package '{package}' has an invalid latest version '{version}': {source}")]
    InvalidVersion {
        package: String,
        version: String,
        #[source]
        source: semver::Error,
    },
}
