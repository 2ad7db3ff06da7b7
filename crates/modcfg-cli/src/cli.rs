//! Command-line argument definitions.
//!
//! The `#[derive(Parser)]` macro from `clap` generates the argument parser
//! from the struct fields and their `#[arg(...)]` attributes.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use modcfg_core::infrastructure::paths::default_base_dir;
use modcfg_core::{ConfigLocation, ConfigStore, CorruptFilePolicy, Scalar};

/// Read and write JSON configuration files for host application plugins.
#[derive(Debug, Parser)]
#[command(name = "modcfg", version)]
pub struct Cli {
    /// Base configuration directory.
    ///
    /// Defaults to the platform's per-user configuration directory
    /// (`%APPDATA%`, `$XDG_CONFIG_HOME` or `~/.config`,
    /// `~/Library/Application Support`).
    #[arg(long, global = true, env = "MODCFG_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// What writes do when the existing file cannot be parsed.
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = PolicyArg::Abort,
        env = "MODCFG_ON_CORRUPT"
    )]
    pub on_corrupt: PolicyArg,

    #[command(subcommand)]
    pub command: Command,
}

/// Identifies one file: `<config-dir>/<DIR>/<FILE>.json`.
#[derive(Debug, Clone, Args)]
pub struct Target {
    /// Directory segment below the config directory (e.g. the mod id).
    pub dir: String,
    /// File name; `.json` is appended when missing.
    pub file: String,
}

impl Target {
    pub fn location(&self) -> ConfigLocation {
        ConfigLocation::new(&self.dir, &self.file)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the file (holding `{}`) if it does not exist.
    Ensure {
        #[command(flatten)]
        target: Target,
    },
    /// Succeed if the file exists.
    Exists {
        #[command(flatten)]
        target: Target,
    },
    /// Print the primitive value stored at KEY.
    Get {
        #[command(flatten)]
        target: Target,
        key: String,
        /// Printed when KEY is missing or of another kind.
        #[arg(long)]
        default: Option<String>,
        /// Only accept values of this kind; `auto` accepts any.
        #[arg(long, value_enum, default_value_t = KindArg::Any)]
        kind: KindArg,
    },
    /// Store VALUE at KEY, replacing any previous value.
    Set {
        #[command(flatten)]
        target: Target,
        key: String,
        value: String,
        /// How VALUE is interpreted; `auto` infers bool, number, or string.
        #[arg(long, value_enum, default_value_t = KindArg::Any)]
        kind: KindArg,
    },
    /// Succeed if KEY is present, whatever its value.
    Has {
        #[command(flatten)]
        target: Target,
        key: String,
    },
    /// Remove KEY from the file.
    Remove {
        #[command(flatten)]
        target: Target,
        key: String,
    },
    /// Succeed if the array at KEY contains VALUE (exact, case-sensitive).
    Contains {
        #[command(flatten)]
        target: Target,
        key: String,
        value: String,
    },
    /// Append VALUE to the array at KEY unless it is already present.
    Append {
        #[command(flatten)]
        target: Target,
        key: String,
        value: String,
    },
    /// Print the length of the array at KEY.
    Len {
        #[command(flatten)]
        target: Target,
        key: String,
    },
    /// Print element INDEX of the array at KEY.
    At {
        #[command(flatten)]
        target: Target,
        key: String,
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
    /// Print every element of the array at KEY, one per line.
    List {
        #[command(flatten)]
        target: Target,
        key: String,
    },
    /// Print every top-level key, one per line.
    Keys {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Abort,
    Discard,
}

impl From<PolicyArg> for CorruptFilePolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Abort => CorruptFilePolicy::Abort,
            PolicyArg::Discard => CorruptFilePolicy::Discard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(name = "auto", alias = "any")]
    Any,
    #[value(name = "string")]
    Str,
    Int,
    Float,
    Bool,
}

impl KindArg {
    /// Parses command-line text as a value of this kind.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not a valid literal of the kind.
    pub fn parse(self, text: &str) -> anyhow::Result<Scalar> {
        let scalar = match self {
            KindArg::Any => Scalar::infer(text),
            KindArg::Str => Scalar::from(text),
            KindArg::Int => text
                .parse::<i64>()
                .map(Scalar::from)
                .with_context(|| format!("'{text}' is not an integer"))?,
            KindArg::Float => {
                let f = text
                    .parse::<f64>()
                    .with_context(|| format!("'{text}' is not a number"))?;
                Scalar::float(f).with_context(|| format!("'{text}' is not a finite number"))?
            }
            KindArg::Bool => text
                .parse::<bool>()
                .map(Scalar::from)
                .with_context(|| format!("'{text}' is not true or false"))?,
        };
        Ok(scalar)
    }

    /// Returns `true` if `scalar` is acceptable for this kind.
    pub fn accepts(self, scalar: &Scalar) -> bool {
        match (self, scalar) {
            (KindArg::Any, _) => true,
            (KindArg::Str, Scalar::String(_)) => true,
            (KindArg::Int, Scalar::Number(n)) => n.as_i64().is_some(),
            (KindArg::Float, Scalar::Number(_)) => true,
            (KindArg::Bool, Scalar::Bool(_)) => true,
            _ => false,
        }
    }
}

impl Cli {
    /// Builds the [`ConfigStore`] described by the global options.
    ///
    /// # Errors
    ///
    /// Returns an error when no `--config-dir` was given and the platform
    /// config directory cannot be determined.
    pub fn build_store(&self) -> anyhow::Result<ConfigStore> {
        let base = match &self.config_dir {
            Some(dir) => dir.clone(),
            None => default_base_dir()
                .context("no --config-dir given and no platform config directory found")?,
        };
        Ok(ConfigStore::new(base).with_policy(self.on_corrupt.into()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_config_dir_and_policy() {
        // Arrange / Act
        let cli = Cli::parse_from([
            "modcfg",
            "--config-dir",
            "/tmp/cfg",
            "--on-corrupt",
            "discard",
            "ensure",
            "mymod",
            "settings",
        ]);

        // Assert
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/cfg")));
        assert_eq!(cli.on_corrupt, PolicyArg::Discard);
        assert!(matches!(cli.command, Command::Ensure { .. }));
    }

    #[test]
    fn test_cli_default_policy_is_abort() {
        let cli = Cli::parse_from(["modcfg", "--config-dir", "/x", "exists", "m", "f"]);
        assert_eq!(cli.on_corrupt, PolicyArg::Abort);
    }

    #[test]
    fn test_cli_at_accepts_negative_index() {
        let cli = Cli::parse_from(["modcfg", "--config-dir", "/x", "at", "m", "f", "k", "-1"]);
        match cli.command {
            Command::At { index, .. } => assert_eq!(index, -1),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_kind() {
        let result = Cli::try_parse_from([
            "modcfg",
            "--config-dir",
            "/x",
            "set",
            "m",
            "f",
            "k",
            "v",
            "--kind",
            "date",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_kind_auto_is_accepted() {
        let cli = Cli::parse_from([
            "modcfg",
            "--config-dir",
            "/x",
            "set",
            "m",
            "f",
            "k",
            "v",
            "--kind",
            "auto",
        ]);
        match cli.command {
            Command::Set { kind, .. } => assert_eq!(kind, KindArg::Any),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_target_location_normalizes_extension() {
        let target = Target {
            dir: "mymod".to_string(),
            file: "settings".to_string(),
        };
        assert_eq!(target.location().file_name(), "settings.json");
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(KindArg::Any.parse("75").unwrap(), Scalar::from(75));
        assert_eq!(KindArg::Str.parse("75").unwrap(), Scalar::from("75"));
        assert_eq!(KindArg::Bool.parse("true").unwrap(), Scalar::from(true));
        assert!(KindArg::Int.parse("1.5").is_err());
        assert!(KindArg::Float.parse("inf").is_err());
        assert!(KindArg::Bool.parse("yes").is_err());
    }

    #[test]
    fn test_kind_accepts() {
        assert!(KindArg::Int.accepts(&Scalar::from(3)));
        assert!(!KindArg::Int.accepts(&Scalar::float(3.5).unwrap()));
        assert!(KindArg::Float.accepts(&Scalar::from(3)));
        assert!(!KindArg::Str.accepts(&Scalar::from(true)));
        assert!(KindArg::Any.accepts(&Scalar::from("x")));
    }

    #[test]
    fn test_build_store_uses_explicit_dir_and_policy() {
        let cli = Cli::parse_from([
            "modcfg",
            "--config-dir",
            "/tmp/cfg",
            "--on-corrupt",
            "discard",
            "keys",
            "m",
            "f",
        ]);

        let store = cli.build_store().unwrap();

        assert_eq!(store.base_dir(), std::path::Path::new("/tmp/cfg"));
        assert_eq!(store.policy(), CorruptFilePolicy::Discard);
    }
}
