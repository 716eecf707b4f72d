//! Views CLI - turn a create-react-app or Expo project into a Views Tools project

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use views_core::tui::CreateArgs;
use views_core::ProductConfig;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Views product configuration
#[derive(Clone)]
pub struct ViewsConfig;

impl ProductConfig for ViewsConfig {
    fn name(&self) -> &'static str {
        "viewstools-use"
    }

    fn display_name(&self) -> &'static str {
        "Views Tools"
    }

    fn package_name(&self) -> &'static str {
        "@viewstools/use"
    }

    fn legacy_name(&self) -> &'static str {
        "use-views"
    }

    fn registry_url_env(&self) -> &'static str {
        "VIEWS_REGISTRY_URL"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/viewstools/docs"
    }

    fn syntax_docs_url(&self) -> &'static str {
        "https://github.com/viewstools/docs#syntax-highlighting"
    }

    fn community_links(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("Twitter", "https://twitter.com/viewstools"),
            ("Slack", "https://slack.views.tools"),
        ]
    }

    fn upgrade_command(&self) -> &'static str {
        "npm install --global @viewstools/use"
    }

    fn legacy_uninstall_command(&self) -> &'static str {
        "npm uninstall --global use-views"
    }
}

#[derive(Parser, Debug)]
#[command(name = "viewstools-use")]
#[command(about = "Turn a create-react-app or Expo project into a Views Tools project")]
#[command(version)]
pub struct Args {
    /// Project directory to convert (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local registry mirror to read package versions from (for development use)
    #[arg(long = "registry-dir")]
    pub registry_dir: Option<PathBuf>,

    /// Update package.json without installing dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Don't check for a newer version of this CLI
    #[arg(long = "skip-update-check")]
    pub skip_update_check: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            directory: args.directory,
            registry_dir: args.registry_dir,
            skip_install: args.skip_install,
            skip_update_check: args.skip_update_check,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = ViewsConfig;

    let result = views_core::run(&config, args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
