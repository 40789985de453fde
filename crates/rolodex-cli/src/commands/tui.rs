use anyhow::{anyhow, Result};
use clap::Args;
use std::env;
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug, Args)]
pub struct TuiArgs {}

pub fn launch(base_url: Option<String>, config_path: Option<PathBuf>, _args: TuiArgs) -> Result<()> {
    let mut command = build_command(base_url, config_path);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = command.exec();
        Err(exec_error(err))
    }

    #[cfg(not(unix))]
    {
        use anyhow::Context as _;
        let status = command.status().with_context(|| "launch rolodex-tui")?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

fn build_command(base_url: Option<String>, config_path: Option<PathBuf>) -> Command {
    let binary = find_tui_binary();
    let mut command = Command::new(binary);
    if let Some(value) = base_url {
        command.arg("--base-url").arg(value);
    }
    if let Some(path) = config_path {
        command.arg("--config").arg(path);
    }
    command
}

fn find_tui_binary() -> PathBuf {
    let name = format!("rolodex-tui{}", env::consts::EXE_SUFFIX);
    if let Ok(current) = env::current_exe() {
        if let Some(dir) = current.parent() {
            let candidate = dir.join(&name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }
    PathBuf::from(name)
}

#[cfg(unix)]
fn exec_error(err: std::io::Error) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        return anyhow!(
            "rolodex-tui binary not found; build it with `cargo build -p rolodex-tui` or install the package"
        );
    }
    anyhow!("launch rolodex-tui failed: {}", err)
}
