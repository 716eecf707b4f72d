//! Product configuration trait for the CLI binary
//!
//! The conversion workflow is shared; everything that names the product, points at
//! its docs or tells the user how to upgrade comes from this trait.

/// Configuration trait for the Views CLI product
///
/// Implementors define:
/// - Product identity (name, display name, registry package)
/// - Package registry location
/// - Documentation and community links
/// - Upgrade instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Package published to the registry for this CLI, used by the update check
    fn package_name(&self) -> &'static str;

    /// Executable name of the deprecated predecessor of this CLI
    fn legacy_name(&self) -> &'static str;

    /// Default package registry URL
    fn default_registry_url(&self) -> &'static str {
        "https://registry.npmjs.org"
    }

    /// Environment variable name for overriding the registry URL
    fn registry_url_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// URL explaining how to set up editor syntax highlighting
    fn syntax_docs_url(&self) -> &'static str;

    /// (label, url) pairs printed whenever the user may need help
    fn community_links(&self) -> &'static [(&'static str, &'static str)];

    /// Install command shown in update and deprecation notices
    fn upgrade_command(&self) -> &'static str;

    /// Command removing the deprecated predecessor
    fn legacy_uninstall_command(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
