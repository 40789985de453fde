mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, contacts, tui, Context};
use crate::error::{exit_code_for, report_error};
use rolodex_client::HttpCollection;
use rolodex_config as config;

#[derive(Debug, Parser)]
#[command(name = "rolodex", version, about = "rolodex CLI")]
struct Cli {
    /// Collection endpoint, overriding the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    Add(contacts::AddArgs),
    Edit(contacts::EditArgs),
    Show(contacts::ShowArgs),
    List(contacts::ListArgs),
    Delete(contacts::DeleteArgs),
    Tui(tui::TuiArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        base_url,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Tui(args) => tui::launch(base_url, config_path, args),
        Command::Completions(args) => completions::emit(args),
        command => {
            let mut app_config = config::load(config_path).with_context(|| "load config")?;
            if let Some(value) = base_url {
                app_config.base_url = config::parse_base_url(&value)?;
            }
            if verbose {
                debug!(base_url = %app_config.base_url, "collection endpoint resolved");
            }

            let collection =
                HttpCollection::new(&app_config.base_url, app_config.user_agent.as_deref())
                    .with_context(|| "build http client")?;

            let ctx = Context {
                collection: &collection,
                json,
            };

            match command {
                Command::Add(args) => contacts::add_contact(&ctx, args),
                Command::Edit(args) => contacts::edit_contact(&ctx, args),
                Command::Show(args) => contacts::show_contact(&ctx, args),
                Command::List(args) => contacts::list_contacts(&ctx, args),
                Command::Delete(args) => contacts::delete_contact(&ctx, args),
                Command::Tui(_) => unreachable!("tui command handled before client construction"),
                Command::Completions(_) => {
                    unreachable!("completions command handled before client construction")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
