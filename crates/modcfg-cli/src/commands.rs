//! Executes one parsed [`Command`] against a [`ConfigStore`].
//!
//! Output goes to the supplied writer so tests can capture it.  The returned
//! `bool` becomes the process exit status: `true` → 0, `false` → 1.

use std::io::Write;

use modcfg_core::{ConfigStore, Scalar};

use crate::cli::Command;

/// Runs `command` and reports whether it succeeded (or, for queries, whether
/// the answer was "yes" / "found").
///
/// # Errors
///
/// Returns an error only for invalid user input (e.g. `--kind int` with a
/// non-integer value) or when writing to `out` fails.  Store failures are
/// logged by the store and surface as `Ok(false)`.
pub fn run(store: &ConfigStore, command: &Command, out: &mut impl Write) -> anyhow::Result<bool> {
    let ok = match command {
        Command::Ensure { target } => store.ensure_file(&target.location()),
        Command::Exists { target } => store.file_exists(&target.location()),
        Command::Get {
            target,
            key,
            default,
            kind,
        } => {
            let found = store
                .scalar(&target.location(), key)
                .filter(|scalar| kind.accepts(scalar));
            match (found, default) {
                (Some(scalar), _) => {
                    writeln!(out, "{scalar}")?;
                    true
                }
                (None, Some(default)) => {
                    let default = kind.parse(default)?;
                    writeln!(out, "{default}")?;
                    true
                }
                (None, None) => false,
            }
        }
        Command::Set {
            target,
            key,
            value,
            kind,
        } => {
            let value = kind.parse(value)?;
            store.set_scalar(&target.location(), key, value)
        }
        Command::Has { target, key } => store.has_key(&target.location(), key),
        Command::Remove { target, key } => store.remove_key(&target.location(), key),
        Command::Contains { target, key, value } => {
            store.array_contains(&target.location(), key, value)
        }
        Command::Append { target, key, value } => {
            store.array_append_unique(&target.location(), key, Scalar::from(value.as_str()))
        }
        Command::Len { target, key } => {
            writeln!(out, "{}", store.array_len(&target.location(), key))?;
            true
        }
        Command::At { target, key, index } => {
            let element = usize::try_from(*index)
                .ok()
                .and_then(|i| store.array_element_at(&target.location(), key, i));
            match element {
                Some(element) => {
                    writeln!(out, "{element}")?;
                    true
                }
                None => false,
            }
        }
        Command::List { target, key } => {
            for element in store.array_values(&target.location(), key) {
                writeln!(out, "{element}")?;
            }
            true
        }
        Command::Keys { target } => {
            for key in store.keys(&target.location()) {
                writeln!(out, "{key}")?;
            }
            true
        }
    };
    Ok(ok)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
