use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

mod cmd;
mod config;
mod dispatch;
mod ergast;
mod frontend;
mod render;
mod utils;

#[cfg(test)]
mod testing;

use config::Config;
use dispatch::CommandStatus;
use render::StyleOptions;

/// f1bot - Formula 1 schedule, standings and results from an Ergast-style dataset
///
/// Usage:
///   f1bot [GLOBAL FLAGS] <command> [ARGS...]      run one command and exit
///   f1bot [GLOBAL FLAGS] --chat                   read chat messages from stdin
///
/// Commands (see `f1bot help` / `f1bot help <command>`):
///   schedule <YEAR>
///   standings <drivers|constructors> [YEAR]
///   results <YEAR> <RACE>... [--session race|qualifying]
///   upcoming
///
/// Global flags / env:
///   -v / -vv        Increase verbosity (logs go to stderr; RUST_LOG overrides)
///   -q / --quiet    Errors only
///   --data PATH     Dataset file, JSON or YAML (or F1BOT_DATA env)
///   --prefix P      Chat command prefix (or F1BOT_CHAT_PREFIX env, default "!f1")
///
/// Examples:
///   f1bot --data season.yaml schedule 2023
///   f1bot --data season.yaml --json standings drivers 2021
///   f1bot --data season.yaml results 2021 abu dhabi -s q
///   F1BOT_DATA=season.json f1bot --chat --prefix '!race'
#[derive(Parser, Debug)]
#[command(
    name = "f1bot",
    version,
    author,
    about = "f1bot - Formula 1 schedule, standings and results"
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,

    /// Dataset file (JSON or YAML)
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Print the full result as JSON instead of rendered text
    #[arg(long, conflicts_with = "chat")]
    json: bool,

    /// Serve chat messages from stdin instead of running one command
    #[arg(long)]
    chat: bool,

    /// Chat command prefix
    #[arg(long, value_name = "PREFIX", requires = "chat")]
    prefix: Option<String>,

    /// Command and its arguments, passed through to the dispatcher
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        conflicts_with = "chat"
    )]
    tokens: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    utils::init_logging(utils::derive_level(cli.verbose, cli.quiet));

    match run(cli) {
        Ok(CommandStatus::Ok) => ExitCode::SUCCESS,
        Ok(CommandStatus::InternalError) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = ?e, "fatal");
            eprintln!("f1bot: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<CommandStatus> {
    let config = Config::from_env(cli.data, cli.prefix);
    let dispatcher = cmd::build_dispatcher(config.services())?;

    if cli.chat {
        let session = frontend::ChatSession::new(&dispatcher, config.chat_prefix.as_str());
        session
            .run(std::io::stdin().lock(), std::io::stdout().lock())
            .context("chat session failed")?;
        return Ok(CommandStatus::Ok);
    }

    let style = StyleOptions::detect();
    let mut stdout = std::io::stdout().lock();
    frontend::run_once(&dispatcher, &cli.tokens, cli.json, &style, &mut stdout)
        .context("failed to write command output")
}
