//! Package manager detection and dependency installation

use anyhow::Result;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for installation (10 minutes)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Lines of stderr kept in the error when an install fails
const STDERR_TAIL_LINES: usize = 20;

/// Package manager used by a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Yarn,
    Npm,
}

impl PackageManager {
    /// Yarn when the project has a yarn.lock, npm otherwise
    pub fn detect(dir: &Path) -> Self {
        if dir.join("yarn.lock").exists() {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }

    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    fn install_args(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Yarn => &[],
            PackageManager::Npm => &["install"],
        }
    }

    /// Get the install command string
    pub fn install_command(&self) -> String {
        std::iter::once(self.binary())
            .chain(self.install_args().iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Command that starts the converted project
    pub fn start_command(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn start",
            PackageManager::Npm => "npm start",
        }
    }

    /// Check if the package manager responds to `--version`
    pub async fn is_available(&self) -> bool {
        TokioCommand::new(self.binary())
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Install the project's dependencies, capturing the package manager's output
    pub async fn install(&self, dir: &Path) -> Result<()> {
        let mut command = TokioCommand::new(self.binary());
        command.args(self.install_args());
        run_captured(command, &self.install_command(), dir, INSTALL_TIMEOUT).await
    }
}

/// Run `command` in `dir` with its output captured, killing it after `limit`
async fn run_captured(
    mut command: TokioCommand,
    cmd: &str,
    dir: &Path,
    limit: Duration,
) -> Result<()> {
    let child = command
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to run `{}`: {}\n\
                 Make sure it is installed and on your PATH.",
                cmd,
                e
            )
        })?;

    // Dropping the future on timeout drops the child, which kills it
    let output = match timeout(limit, child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => {
            anyhow::bail!(
                "`{}` timed out after {} seconds.\n\
                 Please run it manually in {}",
                cmd,
                limit.as_secs(),
                dir.display()
            );
        }
    };

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!(
        "`{}` failed with exit code: {}\n{}",
        cmd,
        output.status.code().unwrap_or(-1),
        tail(&stderr, STDERR_TAIL_LINES)
    );
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// Last `n` non-empty lines of `text`
fn tail(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
