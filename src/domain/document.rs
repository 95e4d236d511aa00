use std::sync::LazyLock;

use regex::Regex;

/// Matches a single metadata block at the very start of the text.
///
/// The block opens with `---` and ends at the first later `---` that is
/// directly followed by a line break.
static METADATA_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A---[\s\S]*?---\r?\n").expect("metadata pattern is a valid regex")
});

/// Removes an optional leading metadata block.
///
/// At most one block is recognised, and only at the start of the text. Text
/// without a block is returned unchanged.
#[must_use]
pub fn strip_metadata(text: &str) -> &str {
    METADATA_BLOCK
        .find(text)
        .map_or(text, |block| &text[block.end()..])
}

/// An outline document, ready to be read line by line.
///
/// Construction strips the metadata block and surrounding whitespace; the
/// remaining body is borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    body: &'a str,
}

impl<'a> Document<'a> {
    /// Prepares the raw text of an outline.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            body: strip_metadata(text).trim(),
        }
    }

    /// The outline body with metadata and surrounding whitespace removed.
    #[must_use]
    pub const fn body(&self) -> &'a str {
        self.body
    }

    /// Returns `true` if nothing remains after preprocessing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The lines of the body, in order.
    ///
    /// Lines are split on `\n`; a trailing `\r` is removed from each line.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.body.lines()
    }
}
