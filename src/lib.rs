//! Markmap outline flattening
//!
//! A markmap outline is a markdown document whose headings form the upper
//! levels of a tree and whose bullet lists, nested under the lowest heading,
//! form the lower levels. This crate flattens such an outline into a table in
//! which every row is one complete root-to-leaf path.

pub mod domain;
pub use domain::{
    Config, ConfigError, Delimiter, Depth, Document, FlattenOptions, HeadingText, Indentation,
    Line, ParseOptionError, PathStack, Quoting, Row, Table, convert, flatten,
};

/// Reading outlines from disk and writing the flattened tables back.
pub mod storage;
pub use storage::{Conversion, ConvertError, Converter};
