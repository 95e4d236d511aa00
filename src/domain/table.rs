use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ParseOptionError;

/// One complete root-to-leaf path through an outline, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row(Vec<String>);

impl Row {
    /// Creates a row from its fields, root first.
    #[must_use]
    pub const fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    /// The fields of the row, root first.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// The number of fields in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the row has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Row {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

/// The flattened outline: rows in the order their branches closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table from rows in emission order.
    #[must_use]
    pub const fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// The rows, in emission order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializes the table: fields joined by `delimiter`, rows joined by
    /// `\n`, no header and no trailing line break.
    #[must_use]
    pub fn to_delimited(&self, delimiter: Delimiter, quoting: Quoting) -> String {
        match quoting {
            Quoting::None => self.join(delimiter),
            Quoting::Necessary => self.write_quoted(delimiter),
        }
    }

    fn join(&self, delimiter: Delimiter) -> String {
        let separator = delimiter.to_string();
        self.rows
            .iter()
            .map(|row| row.fields().join(&separator))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn write_quoted(&self, delimiter: Delimiter) -> String {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter.as_byte())
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(Vec::new());

        for row in &self.rows {
            writer
                .write_record(row.fields())
                .expect("writing to an in-memory buffer cannot fail");
        }

        let bytes = writer
            .into_inner()
            .expect("flushing an in-memory buffer cannot fail");
        let mut output =
            String::from_utf8(bytes).expect("quoting UTF-8 fields with an ASCII delimiter is UTF-8");
        if output.ends_with('\n') {
            output.pop();
        }
        output
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Whether fields are quoted when the table is serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quoting {
    /// Join fields as they are.
    ///
    /// A field containing the delimiter or a line break corrupts the table
    /// structure. Matches existing markmap exports.
    #[default]
    None,

    /// Quote fields that contain the delimiter, a quote, or a line break,
    /// doubling embedded quotes.
    Necessary,
}

impl fmt::Display for Quoting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Necessary => f.write_str("necessary"),
        }
    }
}

impl FromStr for Quoting {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "necessary" => Ok(Self::Necessary),
            _ => Err(ParseOptionError::new("quoting", s, "'none', 'necessary'")),
        }
    }
}

/// The field delimiter: a single ASCII character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Delimiter(u8);

impl Delimiter {
    /// A comma.
    pub const COMMA: Self = Self(b',');

    /// Creates a delimiter from a character.
    ///
    /// # Errors
    ///
    /// Returns an error if the character is not ASCII, or is a quote or a
    /// line break.
    pub fn new(c: char) -> Result<Self, InvalidDelimiter> {
        match u8::try_from(c) {
            Ok(byte) if byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r') => Ok(Self(byte)),
            _ => Err(InvalidDelimiter(c.to_string())),
        }
    }

    /// The delimiter as a byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// The delimiter as a character.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0 as char
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::COMMA
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Delimiter {
    type Err = InvalidDelimiter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(InvalidDelimiter(s.to_string())),
        }
    }
}

impl TryFrom<String> for Delimiter {
    type Error = InvalidDelimiter;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Delimiter> for String {
    fn from(delimiter: Delimiter) -> Self {
        delimiter.to_string()
    }
}

/// Error returned when a string is not a usable delimiter.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(
    "invalid delimiter '{0}': must be a single ASCII character other than a quote or line break"
)]
pub struct InvalidDelimiter(String);

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        rows.iter()
            .map(|fields| Row::new(fields.iter().map(ToString::to_string).collect()))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn plain_join() {
        let table = table(&[&["A", "B", "item1"], &["A", "C"]]);
        assert_eq!(
            table.to_delimited(Delimiter::COMMA, Quoting::None),
            "A,B,item1\nA,C"
        );
    }

    #[test]
    fn empty_table_is_empty_string() {
        let table = Table::default();
        assert_eq!(table.to_delimited(Delimiter::COMMA, Quoting::None), "");
        assert_eq!(table.to_delimited(Delimiter::COMMA, Quoting::Necessary), "");
    }

    #[test]
    fn plain_join_does_not_escape() {
        let table = table(&[&["A", "x,y"], &["A", "line\nbreak"]]);
        assert_eq!(
            table.to_delimited(Delimiter::COMMA, Quoting::None),
            "A,x,y\nA,line\nbreak"
        );
    }

    #[test]
    fn necessary_quoting_escapes_fields() {
        let table = table(&[&["A", "x,y"], &["A", "say \"hi\""], &["A", "line\nbreak"]]);
        assert_eq!(
            table.to_delimited(Delimiter::COMMA, Quoting::Necessary),
            "A,\"x,y\"\nA,\"say \"\"hi\"\"\"\nA,\"line\nbreak\""
        );
    }

    #[test]
    fn necessary_quoting_leaves_plain_fields() {
        let table = table(&[&["A", "B", "item1", "item2"], &["A", "C"]]);
        assert_eq!(
            table.to_delimited(Delimiter::COMMA, Quoting::Necessary),
            "A,B,item1,item2\nA,C"
        );
    }

    #[test]
    fn other_delimiter() {
        let table = table(&[&["A", "x,y"]]);
        let tab = Delimiter::new('\t').unwrap();
        assert_eq!(table.to_delimited(tab, Quoting::None), "A\tx,y");
        assert_eq!(table.to_delimited(tab, Quoting::Necessary), "A\tx,y");
    }

    #[test_case(","; "comma")]
    #[test_case(";"; "semicolon")]
    #[test_case("\t"; "tab")]
    #[test_case("|"; "pipe")]
    fn valid_delimiters(s: &str) {
        let delimiter: Delimiter = s.parse().unwrap();
        assert_eq!(delimiter.to_string(), s);
    }

    #[test_case(""; "empty")]
    #[test_case(",,"; "two characters")]
    #[test_case("\u{2192}"; "non ascii")]
    #[test_case("\""; "quote")]
    #[test_case("\n"; "line break")]
    fn invalid_delimiters(s: &str) {
        assert!(s.parse::<Delimiter>().is_err());
    }

    #[test]
    fn quoting_parses_from_its_display() {
        for quoting in [Quoting::None, Quoting::Necessary] {
            assert_eq!(quoting.to_string().parse(), Ok(quoting));
        }
        assert!("always".parse::<Quoting>().is_err());
    }
}
