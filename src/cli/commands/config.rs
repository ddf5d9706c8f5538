//! Config command handler

use crate::args::ConfigSubcommand;
use chat_viz::config::Config;
use chat_viz::core::pricing::ModelChoice;
use chat_viz::{error, info};
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None => {
            show(config, None);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key }) => {
            show(config, key.as_deref());
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(),
    };

    if let Err(e) = result {
        error!("config: {e}");
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn show(config: &Config, key: Option<&str>) {
    match key {
        Some(k) => match config.get(k) {
            Some(value) => println!("{value}"),
            None => eprintln!("Unknown config key: '{k}'"),
        },
        None => {
            println!("\n=== Configuration ===");
            println!("# {}\n", Config::get_config_file_path().display());
            print!("{config}");
        }
    }
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    if key == "model" {
        value.parse::<ModelChoice>().map_err(|e| e.to_string())?;
    }
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;

    info!("Config key '{key}' set to '{value}'");
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;

    println!("✓ Reset {key} to default");
    Ok(())
}

fn reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Reset configuration to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let answer = response.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
