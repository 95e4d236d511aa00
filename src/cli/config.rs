use std::path::{Path, PathBuf};

use markmap::Config;
use tracing::instrument;

use super::load_config;
use crate::cli::terminal::Colorize;

const KEYS: &str = "output_dir, prefix, timestamp, delimiter, quoting, heading_text, indentation";

#[derive(Debug, clap::Parser)]
/// Show or modify configuration settings
///
/// Configuration is stored in .markmap.toml (or the file given with
/// --config) and provides defaults for every conversion.
///
/// Available configuration keys:
///   `output_dir`    Directory for converted tables (default: next to source)
///   prefix          Output file name prefix (default: markmap-)
///   timestamp       Append a timestamp to file names (default: false)
///   delimiter       Field delimiter (default: ,)
///   quoting         'none' or 'necessary' (default: none)
///   `heading_text`  'offset' or 'trimmed' (default: offset)
///   indentation     'fractional' or 'floor' (default: fractional)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   markmap-csv config set `output_dir` exports
    ///   markmap-csv config set quoting necessary
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },

    /// Restore the default value of a configuration key
    Unset {
        /// Configuration key to reset
        key: String,
    },
}

impl Command {
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => Self::show_config(config_path),
            ConfigCommand::Get { key } => {
                let config = load_config(config_path)?;
                println!("{}", get_value(&config, &key)?);
                Ok(())
            }
            ConfigCommand::Set { key, value } => {
                let mut config = load_config(config_path)?;
                set_value(&mut config, &key, &value)?;
                config.save(config_path)?;
                println!(
                    "{}",
                    format!("{key} = {}", get_value(&config, &key)?).success()
                );
                Ok(())
            }
            ConfigCommand::Unset { key } => {
                let mut config = load_config(config_path)?;
                unset_value(&mut config, &key)?;
                config.save(config_path)?;
                println!(
                    "{}",
                    format!("{key} reset to {}", get_value(&config, &key)?).success()
                );
                Ok(())
            }
        }
    }

    fn show_config(config_path: &Path) -> anyhow::Result<()> {
        let config = load_config(config_path)?;

        println!("Configuration ({}):", config_path.display());
        match config.output_dir() {
            Some(dir) => println!("  output_dir: {}", dir.display()),
            None => println!("  output_dir: {}", "(next to source)".dim()),
        }
        println!("  prefix: {:?}", config.prefix());
        println!("  timestamp: {}", config.timestamp);
        println!("  delimiter: {:?}", config.flatten.delimiter.as_char());
        println!("  quoting: {}", config.flatten.quoting);
        println!("  heading_text: {}", config.flatten.heading_text);
        println!("  indentation: {}", config.flatten.indentation);
        Ok(())
    }
}

fn get_value(config: &Config, key: &str) -> anyhow::Result<String> {
    let value = match key {
        "output_dir" => config
            .output_dir()
            .map_or_else(String::new, |dir| dir.display().to_string()),
        "prefix" => config.prefix().to_string(),
        "timestamp" => config.timestamp.to_string(),
        "delimiter" => config.flatten.delimiter.to_string(),
        "quoting" => config.flatten.quoting.to_string(),
        "heading_text" => config.flatten.heading_text.to_string(),
        "indentation" => config.flatten.indentation.to_string(),
        _ => unknown_key(key)?,
    };
    Ok(value)
}

fn set_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "output_dir" => {
            config.set_output_dir((!value.is_empty()).then(|| PathBuf::from(value)));
        }
        "prefix" => config.set_prefix(value),
        "timestamp" => {
            config.timestamp = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Value must be 'true' or 'false'"))?;
        }
        "delimiter" => config.flatten.delimiter = value.parse()?,
        "quoting" => config.flatten.quoting = value.parse()?,
        "heading_text" => config.flatten.heading_text = value.parse()?,
        "indentation" => config.flatten.indentation = value.parse()?,
        _ => unknown_key(key)?,
    }
    Ok(())
}

fn unset_value(config: &mut Config, key: &str) -> anyhow::Result<()> {
    let defaults = Config::default();
    match key {
        "output_dir" => config.set_output_dir(None),
        "prefix" => config.set_prefix(defaults.prefix()),
        "timestamp" => config.timestamp = defaults.timestamp,
        "delimiter" => config.flatten.delimiter = defaults.flatten.delimiter,
        "quoting" => config.flatten.quoting = defaults.flatten.quoting,
        "heading_text" => config.flatten.heading_text = defaults.flatten.heading_text,
        "indentation" => config.flatten.indentation = defaults.flatten.indentation,
        _ => unknown_key(key)?,
    }
    Ok(())
}

fn unknown_key<T>(key: &str) -> anyhow::Result<T> {
    anyhow::bail!("Unknown configuration key: '{key}'\n\nAvailable keys: {KEYS}")
}
