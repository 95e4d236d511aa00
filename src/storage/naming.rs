use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::Config;

/// Extension of every output file.
pub const OUTPUT_EXTENSION: &str = "csv";

/// Base name used when the source path has no file stem.
pub const FALLBACK_BASE_NAME: &str = "markMap";

/// Format of the optional timestamp suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Builds an output file name: `{prefix}{base}[-{timestamp}].csv`.
#[must_use]
pub fn output_file_name(prefix: &str, base: &str, timestamp: Option<NaiveDateTime>) -> String {
    match timestamp {
        Some(at) => format!(
            "{prefix}{base}-{}.{OUTPUT_EXTENSION}",
            at.format(TIMESTAMP_FORMAT)
        ),
        None => format!("{prefix}{base}.{OUTPUT_EXTENSION}"),
    }
}

/// Derives where the table converted from `source` is written.
///
/// The file goes into the configured output directory, or next to the
/// source when none is configured. `now` is only used when the configuration
/// asks for timestamped names.
#[must_use]
pub fn output_path(source: &Path, config: &Config, now: NaiveDateTime) -> PathBuf {
    let base = source
        .file_stem()
        .map_or_else(|| FALLBACK_BASE_NAME.into(), |stem| stem.to_string_lossy());
    let file_name = output_file_name(
        config.prefix(),
        &base,
        config.timestamp.then_some(now),
    );

    let dir = config
        .output_dir()
        .or_else(|| source.parent())
        .unwrap_or_else(|| Path::new(""));
    dir.join(file_name)
}
