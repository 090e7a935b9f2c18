//! oneline - replay keystrokes against a headless single-line editor
//!
//! Prints the resulting line on stdout. Exits with status 1 when the script
//! ends the session with Escape, so shell callers can tell cancel from commit.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use oneline::cli::CliArgs;
use oneline::keymap::{load_default_keymap, Keymap};
use oneline::script;

fn main() -> Result<ExitCode> {
    oneline::tracing::init();

    let args = CliArgs::parse();
    let config = args.load_config();
    let options = args.session_options(&config);
    if args.save_config {
        args.save_config(&config)
            .map_err(anyhow::Error::msg)
            .context("Failed to save config")?;
    }
    let script = args.script().context("Failed to load script")?;
    let keymap = Keymap::with_bindings(load_default_keymap());

    tracing::debug!(
        "Replaying {} steps over {:?}",
        script.steps.len(),
        script.text
    );
    let outcome = script::run(&script, options, &keymap).context("Failed to replay script")?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?;
        println!("{}", json);
    } else {
        println!("{}", outcome.content);
    }

    if outcome.is_cancelled() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
