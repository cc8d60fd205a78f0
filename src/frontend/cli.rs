//! One-shot CLI front end: dispatch one token list, print the value, report status.

use std::io::{self, Write};

use tracing::debug;

use crate::dispatch::{CommandResult, CommandStatus, Dispatcher};
use crate::render::{self, StyleOptions};

/// Run `tokens` once and write the outcome to `out`.
///
/// Human mode prints only the rendered value; `json` prints the whole
/// result (`{"status": ..., "value": ...}`) pretty-printed.
pub fn run_once<S, W>(
    dispatcher: &Dispatcher,
    tokens: &[S],
    json: bool,
    style: &StyleOptions,
    out: &mut W,
) -> io::Result<CommandStatus>
where
    S: AsRef<str>,
    W: Write,
{
    let result = dispatcher.run_command(tokens);
    debug!(status = %result.status(), json, "cli result");
    writeln!(out, "{}", format_result(&result, json, style))?;
    out.flush()?;
    Ok(result.status())
}

fn format_result(result: &CommandResult, json: bool, style: &StyleOptions) -> String {
    if !json {
        return render::render_cli(result.value(), style);
    }
    serde_json::to_string_pretty(result).unwrap_or_else(|e| {
        serde_json::json!({ "status": result.status(), "error": e.to_string() }).to_string()
    })
}
