//! Version comparison for the self-update check

use anyhow::Result;
use semver::Version;

/// Compare the running CLI version against the latest published one
/// Returns a notice if the CLI is older
pub fn check_for_update(
    cli_version: &str,
    latest_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version).ok()?;
    let latest_ver = parse_version(latest_version).ok()?;

    if cli_ver < latest_ver {
        Some(format!(
            "Update available {} → {}\n\
             Run {} to update",
            cli_version, latest_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse version string, handling various formats
pub fn parse_version(version_str: &str) -> Result<Version> {
    // Remove leading 'v' if present
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}
