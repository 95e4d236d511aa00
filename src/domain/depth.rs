use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ParseOptionError;

/// Width, in columns, of one indentation step. A tab counts as one step.
pub const TAB_WIDTH: usize = 4;

/// Depth of the first list level.
///
/// Depths 1 and 2 are reserved for headings, so list items always nest below
/// two heading levels whether or not both headings appeared.
pub const LIST_OFFSET: usize = 3;

/// How list indentation that is not a whole number of steps is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Indentation {
    /// Keep the fractional depth.
    ///
    /// A fractional depth never equals a path length, so siblings at that
    /// depth do not close each other and the path keeps growing until a
    /// shallower node or the end of input closes it.
    #[default]
    Fractional,

    /// Round partial steps down to the enclosing whole step.
    Floor,
}

impl fmt::Display for Indentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fractional => f.write_str("fractional"),
            Self::Floor => f.write_str("floor"),
        }
    }
}

impl FromStr for Indentation {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fractional" => Ok(Self::Fractional),
            "floor" => Ok(Self::Floor),
            _ => Err(ParseOptionError::new(
                "indentation",
                s,
                "'fractional', 'floor'",
            )),
        }
    }
}

/// Position of a node in the combined heading and list hierarchy.
///
/// Headings sit at their level; list items sit at their indentation step plus
/// [`LIST_OFFSET`]. Depths are held in quarter steps so that list items with a
/// partial indentation step keep their exact fractional depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Depth {
    quarters: usize,
}

impl Depth {
    /// The depth of a heading with the given number of markers.
    #[must_use]
    pub const fn heading(level: usize) -> Self {
        Self {
            quarters: level * TAB_WIDTH,
        }
    }

    /// The depth of a list item indented by `columns` columns.
    #[must_use]
    pub const fn list_item(columns: usize, indentation: Indentation) -> Self {
        let columns = match indentation {
            Indentation::Fractional => columns,
            Indentation::Floor => columns - columns % TAB_WIDTH,
        };
        Self {
            quarters: columns + LIST_OFFSET * TAB_WIDTH,
        }
    }

    /// Returns `true` for the depth of a top-level heading.
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.quarters == TAB_WIDTH
    }

    /// Returns `true` if the depth is a whole number of steps.
    #[must_use]
    pub const fn is_whole(self) -> bool {
        self.quarters % TAB_WIDTH == 0
    }

    /// Returns `true` if a path of `len` nodes reaches strictly deeper than
    /// this depth.
    #[must_use]
    pub const fn is_exceeded_by(self, len: usize) -> bool {
        len * TAB_WIDTH > self.quarters
    }

    /// Returns `true` if a path of `len` nodes ends exactly at this depth.
    #[must_use]
    pub const fn is_reached_by(self, len: usize) -> bool {
        len * TAB_WIDTH == self.quarters
    }

    /// The number of ancestors kept above a node at this depth when the open
    /// path is closed: the depth minus one, truncated towards zero.
    #[must_use]
    pub const fn ancestors(self) -> usize {
        (self.quarters / TAB_WIDTH).saturating_sub(1)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.quarters / TAB_WIDTH;
        match self.quarters % TAB_WIDTH {
            0 => write!(f, "{whole}"),
            1 => write!(f, "{whole}.25"),
            2 => write!(f, "{whole}.5"),
            _ => write!(f, "{whole}.75"),
        }
    }
}
