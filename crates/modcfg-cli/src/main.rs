//! `modcfg` — command-line access to JSON plugin configuration files.
//!
//! Every subcommand maps to one store operation and exits with status 0 when
//! the operation succeeded (or the query answered "yes"), 1 when it did not,
//! and 2 for usage, input or setup errors.
//!
//! # Usage
//!
//! ```text
//! modcfg [--config-dir DIR] [--on-corrupt abort|discard] <COMMAND>
//!
//! modcfg ensure   mymod settings
//! modcfg set      mymod settings volume 75
//! modcfg get      mymod settings volume --default 0
//! modcfg append   mymod lists blocked alice
//! modcfg contains mymod lists blocked alice
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable             | Default                 | Description                 |
//! |----------------------|-------------------------|-----------------------------|
//! | `MODCFG_CONFIG_DIR`  | platform config dir     | Base configuration directory|
//! | `MODCFG_ON_CORRUPT`  | `abort`                 | Corrupt-file write policy   |
//! | `RUST_LOG`           | `warn`                  | Diagnostic verbosity        |

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> ExitCode {
    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // Diagnostics go to stderr so stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // clap exits with status 2 on usage errors before anything else runs.
    let cli = Cli::parse();

    let outcome = cli.build_store().and_then(|store| {
        debug!("using config directory {}", store.base_dir().display());
        let stdout = std::io::stdout();
        commands::run(&store, &cli.command, &mut stdout.lock())
    });

    if let Err(e) = &outcome {
        eprintln!("Error: {e:#}");
    }
    ExitCode::from(exit_status(&outcome))
}

/// Maps a command outcome to the process exit status.
///
/// `true` → 0, `false` → 1, and setup or input errors → 2, the same status
/// clap uses for usage errors.
fn exit_status(outcome: &anyhow::Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
