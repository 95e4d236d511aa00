use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use markmap::{Conversion, Converter, storage::collect_markdown_paths};
use tracing::instrument;

use super::{FlattenArgs, load_config};
use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Markdown files, or directories to search for markdown files
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Directory to write tables to (default: next to each source)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Append a timestamp to output file names
    #[arg(long)]
    timestamp: bool,

    #[command(flatten)]
    flatten: FlattenArgs,
}

impl Command {
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let mut config = load_config(config_path)?;
        if let Some(dir) = self.output_dir {
            config.set_output_dir(Some(dir));
        }
        if self.timestamp {
            config.timestamp = true;
        }
        self.flatten.apply(&mut config.flatten);

        let mut seen = HashSet::new();
        let sources: Vec<PathBuf> = self
            .paths
            .iter()
            .flat_map(|path| collect_markdown_paths(path))
            .filter(|source| seen.insert(source.clone()))
            .collect();
        if sources.is_empty() {
            anyhow::bail!("No markdown files found");
        }
        tracing::debug!("Converting {} file(s)", sources.len());

        let conversions = Converter::new(config).convert_all(&sources);
        let total = conversions.len();
        let mut failures = 0;

        for Conversion { source, result } in conversions {
            match result {
                Ok(destination) => {
                    println!(
                        "{} {} {}",
                        "saved".success(),
                        destination.display(),
                        format!("(from {})", source.display()).dim()
                    );
                }
                Err(e) => {
                    failures += 1;
                    eprintln!("{} {e}", "error:".warning());
                }
            }
        }

        if failures > 0 {
            anyhow::bail!("{failures} of {total} file(s) could not be converted");
        }
        Ok(())
    }
}
