//! CLI argument definitions for `chatviz`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use chat_viz::config::ConfigOverrides;
use chat_viz::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `max_file_depth`, `model`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Render assistant messages into a report.
    ///
    /// Each input is one assistant message. Visualization blocks become charts
    /// or diagnostics; everything else is kept as narrative.
    Render {
        /// Message files; reads stdin when omitted or "-"
        #[arg(value_name = "FILES")]
        input_files: Vec<PathBuf>,

        /// Output file path (single input only; defaults to `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md), html, or json
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,

        /// Report title (defaults to the input file name)
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
    },
    /// List supported chart kinds by category.
    Kinds,
    /// Print the rendering-capabilities system prompt section.
    Prompt,
    /// Compute the token cost of one chat turn.
    Cost {
        /// Prompt tokens
        #[arg(long = "input", value_name = "TOKENS")]
        input_tokens: u64,

        /// Completion tokens
        #[arg(long = "output", value_name = "TOKENS")]
        output_tokens: u64,

        /// Model name or id (defaults to config `model`)
        #[arg(long, value_name = "MODEL")]
        model: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "chatviz",
    about = "Render visualization blocks from LLM chat messages",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level for this run only
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the maximum depth of chained file visualizations
    #[arg(long = "max-file-depth", value_name = "N")]
    pub max_file_depth: Option<usize>,

    /// Override the directory file visualizations resolve against
    #[arg(long = "file-root", value_name = "DIR")]
    pub file_root: Option<PathBuf>,

    /// Override the reports output directory
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    ///
    /// # Examples
    /// ```ignore
    /// let args = Cli::parse();
    /// let overrides = args.to_config_overrides();
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let model = match &self.command {
            Command::Cost { model, .. } => model.clone(),
            _ => None,
        };
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            max_file_depth: self.max_file_depth,
            file_root: self
                .file_root
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            reports_dir: self
                .out_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            max_file_depth: None,
            file_root: None,
            out_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare(Command::Config { subcommand: None }).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.max_file_depth.is_none());
        assert!(overrides.file_root.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.model.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            max_file_depth: Some(1),
            file_root: Some(PathBuf::from("/data")),
            out_dir: Some(PathBuf::from("/output")),
            ..bare(Command::Kinds)
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.max_file_depth, Some(1));
        assert_eq!(overrides.file_root, Some("/data".to_string()));
        assert_eq!(overrides.reports_dir, Some("/output".to_string()));
    }

    #[test]
    fn test_cost_model_becomes_override() {
        let cli = bare(Command::Cost {
            input_tokens: 10,
            output_tokens: 20,
            model: Some("Haiku 3".to_string()),
        });
        assert_eq!(cli.to_config_overrides().model, Some("Haiku 3".to_string()));
    }

    #[test]
    fn test_parse_render_command() {
        let cli = Cli::try_parse_from([
            "chatviz", "--max-file-depth", "2", "render", "a.txt", "-f", "md", "--title", "T",
        ])
        .unwrap();
        assert_eq!(cli.max_file_depth, Some(2));
        match cli.command {
            Command::Render {
                input_files,
                format,
                title,
                output,
            } => {
                assert_eq!(input_files, [PathBuf::from("a.txt")]);
                assert_eq!(format, "md");
                assert_eq!(title.as_deref(), Some("T"));
                assert!(output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
