//! Command-line interface entry point for `chatviz`

mod args;
mod commands;

use args::{Cli, Command};
use chat_viz::config::Config;
use chat_viz::info;
use chat_viz::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use clap::Parser;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup; overrides only touch the run copy
    let mut stored = Config::load();
    let defaults = Config::from_defaults();
    let config = stored.with_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut stored, &defaults);
        }
        Command::Render {
            input_files,
            output,
            format,
            title,
        } => {
            let options = commands::render::RenderOptions {
                output: output.as_deref(),
                format: &format,
                title: title.as_deref(),
            };
            if !commands::render::run(&input_files, &options, &config) {
                std::process::exit(1);
            }
        }
        Command::Kinds => commands::kinds::run(),
        Command::Prompt => commands::prompt::run(),
        Command::Cost {
            input_tokens,
            output_tokens,
            ..
        } => {
            if let Err(e) = commands::cost::run(&config.model.name, input_tokens, output_tokens) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
