//! Views Core - turns create-react-app and Expo projects into Views Tools projects
//!
//! The conversion is a fixed recipe run once inside a project directory:
//!
//! 1. Look up the latest versions of the Views packages (concurrently)
//! 2. Add them to package.json and rewire its scripts around `views-morph`
//! 3. Install with the project's package manager (yarn or npm)
//! 4. Write a sample View plus platform files, drop the stock boilerplate
//! 5. Print how to run the project
//!
//! # Architecture
//!
//! - **Layer 1: Core Operations** - package.json editing, project detection, registry
//!   lookups, installation, file bootstrapping
//! - **Layer 2: Product Configuration** - `ProductConfig` trait naming the product and
//!   its links
//! - **Layer 3: CLI Interface** - cliclack-based workflow and notices (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based workflow module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use views_core::{bootstrap, plan, project, RegistryClient};
//!
//! let mut pkg = project::PackageJson::load(dir).await?.expect("package.json");
//! if let project::Detection::Convert(platform) = project::detect(&pkg) {
//!     let deps = plan::DependencyPlan::for_platform(platform);
//!     let versions = registry.latest_versions(&deps.package_names()).await?;
//!     deps.apply(&mut pkg, &versions)?;
//!     plan::apply_scripts(&mut pkg, platform)?;
//!     pkg.save(dir).await?;
//!     bootstrap::bootstrap(dir, platform).await?;
//! }
//! ```

pub mod bootstrap;
pub mod install;
pub mod plan;
pub mod product;
pub mod project;
pub mod registry;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use install::PackageManager;
pub use plan::DependencyPlan;
pub use product::ProductConfig;
pub use project::{detect, Detection, PackageJson, Platform};
pub use registry::{PackageVersion, RegistryClient, RegistryError, RegistrySource};

#[cfg(feature = "tui")]
pub use tui::run;
