use std::{
    collections::{HashMap, hash_map::Entry},
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use walkdir::{DirEntry, WalkDir};

use super::naming::output_path;
use crate::{Config, domain::convert};

/// File extensions recognised as markdown outlines.
pub const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Returns `true` if the path has a markdown extension (case-insensitive).
#[must_use]
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| ext.eq_ignore_ascii_case(md))
        })
}

/// Collects the markdown files under `root`, sorted by path.
///
/// A `root` that is a file is returned as-is, whatever its extension, so that
/// the conversion can report it. Hidden files and directories below `root`
/// are skipped.
#[must_use]
pub fn collect_markdown_paths(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        return vec![root.to_path_buf()];
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry under {}: {e}", root.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_markdown(entry.path()))
        .map(DirEntry::into_path)
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Converts outline documents on disk into delimited tables.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: Config,
}

impl Converter {
    /// Creates a converter using the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Converts one markdown file, returning the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not a markdown file, cannot be read,
    /// or if the output cannot be written.
    pub fn convert_file(&self, source: &Path) -> Result<PathBuf, ConvertError> {
        self.convert_file_at(source, Local::now().naive_local())
    }

    /// Converts one markdown file as if at time `now`, returning the path
    /// written.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not a markdown file, cannot be read,
    /// or if the output cannot be written.
    pub fn convert_file_at(
        &self,
        source: &Path,
        now: NaiveDateTime,
    ) -> Result<PathBuf, ConvertError> {
        if !is_markdown(source) {
            return Err(ConvertError::NotMarkdown(source.to_path_buf()));
        }

        let text = std::fs::read_to_string(source).map_err(|source_error| ConvertError::Read {
            path: source.to_path_buf(),
            source: source_error,
        })?;

        let table = convert(&text, &self.config.flatten);

        let destination = output_path(source, &self.config, now);
        write_table(&destination, &table).map_err(|source| ConvertError::Write {
            path: destination.clone(),
            source,
        })?;

        tracing::info!(
            "Converted {} to {}",
            source.display(),
            destination.display()
        );
        Ok(destination)
    }

    /// Converts every source in parallel.
    ///
    /// A failure converting one source does not stop the others; results are
    /// returned in the order of `sources`. When several sources map to the
    /// same output file, only the first is converted and the rest fail with
    /// [`ConvertError::DuplicateOutput`].
    #[must_use]
    pub fn convert_all(&self, sources: &[PathBuf]) -> Vec<Conversion> {
        let now = Local::now().naive_local();

        let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
        let planned: Vec<(&PathBuf, Option<ConvertError>)> = sources
            .iter()
            .map(|source| {
                if !is_markdown(source) {
                    return (source, None);
                }
                match claimed.entry(output_path(source, &self.config, now)) {
                    Entry::Occupied(first) => {
                        let conflict = ConvertError::DuplicateOutput {
                            path: first.key().clone(),
                            other: first.get().to_path_buf(),
                        };
                        (source, Some(conflict))
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(source);
                        (source, None)
                    }
                }
            })
            .collect();

        planned
            .into_par_iter()
            .map(|(source, conflict)| Conversion {
                result: match conflict {
                    Some(e) => Err(e),
                    None => self.convert_file_at(source, now),
                },
                source: source.clone(),
            })
            .collect()
    }
}

fn write_table(destination: &Path, table: &str) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(destination, table)
}

/// The outcome of converting a single source file.
#[derive(Debug)]
pub struct Conversion {
    /// The markdown file that was converted.
    pub source: PathBuf,
    /// The path written, or why the conversion failed.
    pub result: Result<PathBuf, ConvertError>,
}

/// Errors that can occur when converting a file.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The source is not a markdown file.
    #[error("{} is not a markdown file", .0.display())]
    NotMarkdown(PathBuf),

    /// The source could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The source file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Another source in the same batch already writes to this output file.
    #[error("{} would overwrite the table converted from {}", path.display(), other.display())]
    DuplicateOutput {
        /// The contested output file.
        path: PathBuf,
        /// The source that claimed the output file first.
        other: PathBuf,
    },

    /// The converted table could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The destination file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}
