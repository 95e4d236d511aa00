mod converter;
/// Output file naming.
pub mod naming;

pub use converter::{Conversion, ConvertError, Converter, collect_markdown_paths, is_markdown};
pub use naming::output_path;
