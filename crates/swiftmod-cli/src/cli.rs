//! Command-line arguments.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use swiftmod_codegen::{AccessLevel, GeneratorOptions, OverloadStrategy};

#[derive(Parser, Debug)]
#[command(
    name = "swiftmod",
    version,
    about = "Generate tagged unions for SwiftUI view modifiers"
)]
pub struct Args {
    /// JSON manifest of extracted modifier signatures
    pub input: PathBuf,

    /// Output directory for generated files
    #[arg(short, long, default_value = "Generated")]
    pub out: PathBuf,

    /// JSON file with generator options
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Remove previously generated files from the output directory first
    #[arg(long)]
    pub clean: bool,

    /// Write the categories that succeeded even if others failed
    #[arg(long)]
    pub keep_going: bool,

    /// Name of the view parameter in the dispatch method
    #[arg(long, value_name = "NAME")]
    pub receiver: Option<String>,

    /// Access level of generated declarations
    #[arg(long, value_enum)]
    pub access: Option<AccessArg>,

    /// How overloaded modifiers are named
    #[arg(long, value_enum)]
    pub overloads: Option<OverloadArg>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccessArg {
    Public,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverloadArg {
    LabelSuffix,
    Reject,
}

impl Args {
    /// Options from `--config`, with command-line overrides applied.
    pub fn generator_options(&self) -> Result<GeneratorOptions> {
        let mut options = match &self.config {
            Some(path) => GeneratorOptions::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => GeneratorOptions::default(),
        };

        if let Some(receiver) = &self.receiver {
            options.receiver_name = receiver.clone();
        }
        if let Some(access) = self.access {
            options.access_level = match access {
                AccessArg::Public => AccessLevel::Public,
                AccessArg::Internal => AccessLevel::Internal,
            };
        }
        if let Some(overloads) = self.overloads {
            options.overload_strategy = match overloads {
                OverloadArg::LabelSuffix => OverloadStrategy::LabelSuffix,
                OverloadArg::Reject => OverloadStrategy::Reject,
            };
        }

        Ok(options)
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["swiftmod", "modifiers.json"]).unwrap();
        assert_eq!(args.out, PathBuf::from("Generated"));
        assert!(!args.clean);
        assert_eq!(args.log_filter(), "warn");
        assert_eq!(args.generator_options().unwrap(), GeneratorOptions::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "swiftmod",
            "modifiers.json",
            "--receiver",
            "view",
            "--access",
            "internal",
            "--overloads",
            "reject",
            "-vv",
        ])
        .unwrap();

        let options = args.generator_options().unwrap();
        assert_eq!(options.receiver_name, "view");
        assert_eq!(options.access_level, AccessLevel::Internal);
        assert_eq!(options.overload_strategy, OverloadStrategy::Reject);
        assert_eq!(args.log_filter(), "trace");
    }

    #[test]
    fn test_overrides_win_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("swiftmod.json");
        std::fs::write(&config, r#"{ "receiver_name": "base", "max_type_depth": 2 }"#).unwrap();

        let args = Args::try_parse_from([
            "swiftmod",
            "modifiers.json",
            "--config",
            config.to_str().unwrap(),
            "--receiver",
            "view",
        ])
        .unwrap();

        let options = args.generator_options().unwrap();
        assert_eq!(options.receiver_name, "view");
        assert_eq!(options.max_type_depth, 2);
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let args =
            Args::try_parse_from(["swiftmod", "modifiers.json", "--config", "/nonexistent.json"])
                .unwrap();
        assert!(args.generator_options().is_err());
    }
}
