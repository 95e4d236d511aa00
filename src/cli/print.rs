use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::Context;
use markmap::{convert, storage::is_markdown};
use tracing::instrument;

use super::{FlattenArgs, load_config};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Markdown file to flatten, or '-' to read from stdin
    #[arg(value_name = "FILE")]
    path: PathBuf,

    #[command(flatten)]
    flatten: FlattenArgs,
}

impl Command {
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let mut config = load_config(config_path)?;
        self.flatten.apply(&mut config.flatten);

        let text = if self.path == Path::new("-") {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read from stdin")?;
            text
        } else {
            if !is_markdown(&self.path) {
                anyhow::bail!("{} is not a markdown file", self.path.display());
            }
            std::fs::read_to_string(&self.path)
                .with_context(|| format!("failed to read {}", self.path.display()))?
        };

        let output = convert(&text, &config.flatten);
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    }
}
