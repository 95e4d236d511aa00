use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    ParseOptionError,
    depth::{Depth, Indentation, TAB_WIDTH},
};

/// Marks a heading when it is the first character of a line.
pub const HEADING_MARKER: char = '#';

/// Marks a list item when it is the first non-whitespace character of a line.
pub const LIST_MARKER: char = '-';

/// How the text of a heading is extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeadingText {
    /// Skip the marker run and exactly one following character.
    ///
    /// Compatible with existing markmap exports: a heading written without a
    /// space after its markers (`##Title`) loses its first character
    /// (`itle`).
    #[default]
    Offset,

    /// Strip the marker run and trim the remainder.
    Trimmed,
}

impl fmt::Display for HeadingText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset => f.write_str("offset"),
            Self::Trimmed => f.write_str("trimmed"),
        }
    }
}

impl FromStr for HeadingText {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offset" => Ok(Self::Offset),
            "trimmed" => Ok(Self::Trimmed),
            _ => Err(ParseOptionError::new(
                "heading text",
                s,
                "'offset', 'trimmed'",
            )),
        }
    }
}

/// A classified line of an outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// A heading. `level` is the number of leading markers.
    Heading {
        /// Number of leading heading markers (at least one).
        level: usize,
        /// Heading text.
        text: &'a str,
    },

    /// A bullet list item.
    ListItem {
        /// Leading whitespace width, with tabs counted as [`TAB_WIDTH`]
        /// columns.
        columns: usize,
        /// Item text after the list marker, trimmed.
        text: &'a str,
    },

    /// Anything else. Ignored lines do not affect the outline.
    Ignored,
}

impl<'a> Line<'a> {
    /// Classifies a single line.
    ///
    /// A line starting with [`HEADING_MARKER`] is a heading whatever follows;
    /// otherwise a line whose first non-whitespace character is
    /// [`LIST_MARKER`] is a list item; anything else is ignored.
    #[must_use]
    pub fn classify(line: &'a str, heading_text: HeadingText) -> Self {
        if line.starts_with(HEADING_MARKER) {
            let rest = line.trim_start_matches(HEADING_MARKER);
            let level = line.len() - rest.len();
            let text = match heading_text {
                HeadingText::Offset => {
                    let mut chars = rest.chars();
                    chars.next();
                    chars.as_str()
                }
                HeadingText::Trimmed => rest.trim(),
            };
            return Self::Heading { level, text };
        }

        let content = line.trim_start();
        if let Some(item) = content.strip_prefix(LIST_MARKER) {
            let indent = &line[..line.len() - content.len()];
            return Self::ListItem {
                columns: indent_width(indent),
                text: item.trim(),
            };
        }

        Self::Ignored
    }

    /// The depth of this line in the outline, or `None` for ignored lines.
    #[must_use]
    pub const fn depth(&self, indentation: Indentation) -> Option<Depth> {
        match *self {
            Self::Heading { level, .. } => Some(Depth::heading(level)),
            Self::ListItem { columns, .. } => Some(Depth::list_item(columns, indentation)),
            Self::Ignored => None,
        }
    }

    /// The node text, or `None` for ignored lines.
    #[must_use]
    pub const fn text(&self) -> Option<&'a str> {
        match *self {
            Self::Heading { text, .. } | Self::ListItem { text, .. } => Some(text),
            Self::Ignored => None,
        }
    }
}

fn indent_width(indent: &str) -> usize {
    indent
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}
