use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    FlattenOptions,
    depth::Indentation,
    line::HeadingText,
    table::{Delimiter, Quoting},
};

/// Configuration for converting outlines.
///
/// Controls where converted tables are written, how their files are named,
/// and how outlines are flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Directory that converted tables are written to.
    ///
    /// When `None` (default), each table is written next to its source
    /// document.
    output_dir: Option<PathBuf>,

    /// Prefix of every output file name.
    ///
    /// For example, `markmap-` turns `ideas.md` into `markmap-ideas.csv`.
    prefix: String,

    /// Whether output file names carry a local-time suffix
    /// (`markmap-ideas-20240131235959.csv`).
    pub timestamp: bool,

    /// How outlines are flattened and serialized.
    pub flatten: FlattenOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            prefix: default_prefix(),
            timestamp: false,
            flatten: FlattenOptions::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the configuration from `path`, or returns the default
    /// configuration if no file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the configured output directory, if any.
    #[must_use]
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Sets the output directory. `None` writes tables next to their sources.
    pub fn set_output_dir(&mut self, dir: Option<PathBuf>) {
        self.output_dir = dir;
    }

    /// Returns the output file name prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Sets the output file name prefix.
    ///
    /// Path separators are not allowed in the prefix; they are replaced with
    /// `-`.
    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = file_name_safe(prefix);
    }
}

fn file_name_safe(prefix: &str) -> String {
    prefix.replace(['/', '\\'], "-")
}

fn default_prefix() -> String {
    "markmap-".to_string()
}

/// Errors that can occur when loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// The configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        /// The configuration file.
        path: PathBuf,
        /// The underlying TOML error.
        source: toml::de::Error,
    },

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    /// The configuration file could not be written.
    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        /// The configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output_dir: Option<PathBuf>,

        #[serde(default = "default_prefix")]
        prefix: String,

        #[serde(default)]
        timestamp: bool,

        #[serde(default)]
        delimiter: Delimiter,

        #[serde(default)]
        quoting: Quoting,

        /// Heading text extraction; `offset` matches existing exports.
        #[serde(default)]
        heading_text: HeadingText,

        /// Partial indentation handling; `fractional` matches existing
        /// exports.
        #[serde(default)]
        indentation: Indentation,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                output_dir,
                prefix,
                timestamp,
                delimiter,
                quoting,
                heading_text,
                indentation,
            } => Self {
                output_dir,
                prefix: file_name_safe(&prefix),
                timestamp,
                flatten: FlattenOptions {
                    delimiter,
                    quoting,
                    heading_text,
                    indentation,
                },
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        let Config {
            output_dir,
            prefix,
            timestamp,
            flatten:
                FlattenOptions {
                    delimiter,
                    quoting,
                    heading_text,
                    indentation,
                },
        } = config;
        Self::V1 {
            output_dir,
            prefix,
            timestamp,
            delimiter,
            quoting,
            heading_text,
            indentation,
        }
    }
}
