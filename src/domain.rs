//! Domain models for outline flattening.
//!
//! Flattening is a single left-to-right pass: the [`Document`] yields lines,
//! each line is classified into a [`Line`], resolved to a [`Depth`], and fed
//! to a [`PathStack`] which emits a [`Row`] whenever a branch closes.

mod config;
pub use config::{Config, ConfigError};

/// Metadata stripping and line splitting.
pub mod document;
pub use document::Document;

/// Unified heading and list depths.
pub mod depth;
pub use depth::{Depth, Indentation};

/// Line classification.
pub mod line;
pub use line::{HeadingText, Line};

mod outline;
pub use outline::{FlattenOptions, convert, flatten};

mod path_stack;
pub use path_stack::PathStack;

/// Rows, tables, and their delimited serialization.
pub mod table;
pub use table::{Delimiter, Quoting, Row, Table};

mod parse_option;
pub use parse_option::ParseOptionError;
