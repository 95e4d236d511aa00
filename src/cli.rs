use std::path::{Path, PathBuf};

mod config;
mod convert;
mod print;
mod terminal;

use clap::ArgAction;
use markmap::{Config, Delimiter, FlattenOptions, HeadingText, Indentation, Quoting};

/// Configuration file used when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = ".markmap.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run(&self.config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the converted tables
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Convert markdown outlines into CSV files
    ///
    /// Directories are searched recursively for markdown files. Each table is
    /// written to `<prefix><name>.csv`, next to its source unless an output
    /// directory is configured.
    Convert(convert::Command),

    /// Print the flattened table of one outline to stdout
    Print(print::Command),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Command {
    fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self {
            Self::Convert(command) => command.run(config_path),
            Self::Print(command) => command.run(config_path),
            Self::Config(command) => command.run(config_path),
        }
    }
}

/// Flattening options that override the configuration for a single run.
#[derive(Debug, Default, clap::Args)]
struct FlattenArgs {
    /// Field delimiter (a single ASCII character)
    #[arg(short, long)]
    delimiter: Option<Delimiter>,

    /// Quote fields containing the delimiter, quotes, or line breaks
    #[arg(long)]
    quote: bool,

    /// Heading text extraction: 'offset' or 'trimmed'
    #[arg(long, value_name = "MODE")]
    heading_text: Option<HeadingText>,

    /// Partial list indentation: 'fractional' or 'floor'
    #[arg(long, value_name = "MODE")]
    indentation: Option<Indentation>,
}

impl FlattenArgs {
    fn apply(&self, options: &mut FlattenOptions) {
        if let Some(delimiter) = self.delimiter {
            options.delimiter = delimiter;
        }
        if self.quote {
            options.quoting = Quoting::Necessary;
        }
        if let Some(heading_text) = self.heading_text {
            options.heading_text = heading_text;
        }
        if let Some(indentation) = self.indentation {
            options.indentation = indentation;
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    Ok(Config::load_or_default(path)?)
}
