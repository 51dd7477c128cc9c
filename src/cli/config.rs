//! Config CLI command handlers

use crate::cli::commands::ConfigCommand;
use crate::core::config::Config;
use crate::error::{Result, ScoutError};

const KEYS: &str = "server-url, timeout-secs, link-display-cap";

/// Handle config commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Get { key } => handle_get(&key),
        ConfigCommand::Set { key, value } => handle_set(&key, &value),
        ConfigCommand::Path => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

fn handle_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    match key {
        "server-url" => println!("{}", config.server_url),
        "timeout-secs" => println!("{}", config.timeout_secs),
        "link-display-cap" => println!("{}", config.link_display_cap),
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

fn handle_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    match key {
        "server-url" => {
            // Validate before persisting
            url::Url::parse(value)
                .map_err(|e| ScoutError::InvalidInput(format!("not a valid URL: {e}")))?;
            config.server_url = value.to_string();
        }
        "timeout-secs" => {
            config.timeout_secs = value
                .parse()
                .map_err(|_| ScoutError::InvalidInput(format!("not a number: {value}")))?;
        }
        "link-display-cap" => {
            config.link_display_cap = value
                .parse()
                .map_err(|_| ScoutError::InvalidInput(format!("not a number: {value}")))?;
        }
        _ => return Err(unknown_key(key)),
    }
    config.save()?;
    println!("{key} = {value}");
    Ok(())
}

fn unknown_key(key: &str) -> ScoutError {
    ScoutError::InvalidInput(format!("Unknown config key '{key}'.\n\n  → Valid keys: {KEYS}"))
}
