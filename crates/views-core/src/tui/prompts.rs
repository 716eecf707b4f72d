//! Conversion workflow with cliclack spinners

use crate::bootstrap;
use crate::install::PackageManager;
use crate::plan::{self, DependencyPlan};
use crate::product::ProductConfig;
use crate::project::{self, Detection, PackageJson, Platform};
use crate::registry::{PackageVersion, RegistryClient};
use crate::tui::notices;
use crate::version;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The self-update check gives up after this long
const UPDATE_CHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// CLI arguments for the conversion
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to convert (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Local registry mirror to read versions from instead of the remote registry
    pub registry_dir: Option<PathBuf>,

    /// Update package.json but leave installing to the user
    pub skip_install: bool,

    /// Don't check the registry for a newer CLI
    pub skip_update_check: bool,
}

/// Convert the project, reporting each step
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    // Step 1: Deprecation or update notice
    if invoked_as(config.legacy_name()) {
        println!("{}", notices::deprecation(config));
    } else if !args.skip_update_check {
        notify_update(config, &args.registry_dir, cli_version).await;
    }

    // Step 2: Inspect the project
    let project_dir = resolve_directory(&args)?;

    let Some(mut pkg) = PackageJson::load(&project_dir).await? else {
        println!("{}", notices::unsupported(config, &project_dir));
        return Ok(());
    };

    let package_manager = PackageManager::detect(&project_dir);

    let platform = match project::detect(&pkg) {
        Detection::AlreadyViews(platform) => {
            println!("{}", notices::already_views());
            println!("{}", notices::help(config, platform, package_manager));
            return Ok(());
        }
        Detection::Unsupported => {
            println!("{}", notices::unsupported(config, &project_dir));
            return Ok(());
        }
        Detection::Convert(platform) => platform,
    };

    if !args.skip_install && !package_manager.is_available().await {
        anyhow::bail!(
            "This project uses {} but it isn't installed. Install it, or rerun with --skip-install.",
            package_manager
        );
    }

    cliclack::intro(config.display_name())?;
    cliclack::log::info(format!(
        "In a few minutes, your {} project will be ready to use Views! 😇",
        platform
    ))?;

    // Step 3: Resolve versions
    let registry = setup_registry(config, &args.registry_dir)?;
    let dependency_plan = DependencyPlan::for_platform(platform);
    let versions = fetch_versions(&registry, &dependency_plan).await?;

    // Step 4: Rewrite package.json
    setup_project(&project_dir, &mut pkg, platform, &dependency_plan, &versions).await?;

    // Step 5: Install
    if args.skip_install {
        cliclack::log::info(format!(
            "Skipping install. Run {} when you're ready",
            package_manager.install_command()
        ))?;
    } else {
        install_dependencies(&project_dir, package_manager).await?;
    }

    // Step 6: Sample View
    prepare_sample(&project_dir, platform).await?;

    cliclack::outro("🦄")?;

    // Step 7: Show what's next
    println!("{}", notices::success(config));
    println!("{}", notices::help(config, platform, package_manager));

    Ok(())
}

fn setup_registry<C: ProductConfig>(
    config: &C,
    registry_dir: &Option<PathBuf>,
) -> Result<RegistryClient> {
    let registry = match registry_dir {
        Some(path) => RegistryClient::from_local(path.clone(), config.user_agent()),
        None => RegistryClient::from_config(config)?,
    };

    Ok(registry)
}

/// Whether the executable was started under `name`
fn invoked_as(name: &str) -> bool {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_stem())
        .is_some_and(|stem| stem == name)
}

/// Best effort: any failure or a slow registry just skips the notice
async fn notify_update<C: ProductConfig>(
    config: &C,
    registry_dir: &Option<PathBuf>,
    cli_version: &str,
) {
    let Ok(registry) = setup_registry(config, registry_dir) else {
        return;
    };
    let lookup = registry.latest_version(config.package_name());
    let Ok(Ok(latest)) = tokio::time::timeout(UPDATE_CHECK_TIMEOUT, lookup).await else {
        return;
    };

    if let Some(notice) =
        version::check_for_update(cli_version, &latest.to_string(), config.upgrade_command())
    {
        println!("{}", notices::update_available(&notice));
    }
}

fn resolve_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let path = directory_from(&current_dir, args.directory.as_deref());

    if !path.is_dir() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }

    Ok(path)
}

fn directory_from(current_dir: &Path, directory: Option<&Path>) -> PathBuf {
    match directory {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => current_dir.join(dir),
        None => current_dir.to_path_buf(),
    }
}

async fn fetch_versions(
    registry: &RegistryClient,
    dependency_plan: &DependencyPlan,
) -> Result<Vec<PackageVersion>> {
    let spinner = cliclack::spinner();
    spinner.start("Getting the latest versions of Views dependencies");

    match registry
        .latest_versions(&dependency_plan.package_names())
        .await
    {
        Ok(versions) => {
            spinner.stop(format!(
                "Got the latest versions of {} packages",
                versions.len()
            ));
            Ok(versions)
        }
        Err(e) => {
            spinner.stop("Failed to get the latest versions");
            Err(e)
        }
    }
}

async fn setup_project(
    project_dir: &Path,
    pkg: &mut PackageJson,
    platform: Platform,
    dependency_plan: &DependencyPlan,
    versions: &[PackageVersion],
) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Setting up the project");

    dependency_plan.apply(pkg, versions)?;
    plan::apply_scripts(pkg, platform)?;
    pkg.save(project_dir).await?;

    spinner.stop("Set up package.json");
    Ok(())
}

async fn install_dependencies(project_dir: &Path, package_manager: PackageManager) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start(format!(
        "Installing the dependencies ({})",
        package_manager.install_command()
    ));

    match package_manager.install(project_dir).await {
        Ok(()) => {
            spinner.stop("Installed the dependencies");
            Ok(())
        }
        Err(e) => {
            spinner.stop("Failed to install the dependencies");
            Err(e.context(format!(
                "package.json was updated; run {} again once the problem is fixed",
                package_manager.install_command()
            )))
        }
    }
}

async fn prepare_sample(project_dir: &Path, platform: Platform) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Preparing a sample View for you to work with");

    let report = bootstrap::bootstrap(project_dir, platform).await?;

    spinner.stop(format!(
        "Wrote {} files, removed {}",
        report.written.len(),
        report.removed.len()
    ));
    Ok(())
}
