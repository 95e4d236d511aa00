use super::{
    depth::Indentation,
    document::Document,
    line::{HeadingText, Line},
    path_stack::PathStack,
    table::{Delimiter, Quoting, Table},
};

/// Options controlling how an outline is read and serialized.
///
/// The defaults reproduce existing markmap exports exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Field delimiter.
    pub delimiter: Delimiter,
    /// Field quoting.
    pub quoting: Quoting,
    /// Heading text extraction.
    pub heading_text: HeadingText,
    /// Resolution of partial list indentation.
    pub indentation: Indentation,
}

/// Flattens an outline into a table of root-to-leaf paths.
///
/// Every input is accepted: text with no headings or list items produces an
/// empty table.
#[must_use]
pub fn flatten(text: &str, options: &FlattenOptions) -> Table {
    let mut stack = PathStack::new();

    for line in Document::new(text).lines() {
        let line = Line::classify(line, options.heading_text);
        let (Some(depth), Some(node)) = (line.depth(options.indentation), line.text()) else {
            continue;
        };

        stack.push(depth, node);
        tracing::trace!(%depth, node, path = ?stack.path(), "pushed outline node");
    }

    stack.finish()
}

/// Flattens an outline and serializes the result.
#[must_use]
pub fn convert(text: &str, options: &FlattenOptions) -> String {
    flatten(text, options).to_delimited(options.delimiter, options.quoting)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_csv(text: &str) -> String {
        convert(text, &FlattenOptions::default())
    }

    #[test]
    fn headings_and_nested_list() {
        let text = "# A\n## B\n- item1\n    - item2\n    - item3\n## C";
        assert_eq!(to_csv(text), "A,B,item1,item2\nA,B,item1,item3\nA,C");
    }

    #[test]
    fn single_root() {
        assert_eq!(to_csv("# Solo"), "Solo");
    }

    #[test]
    fn metadata_block_is_ignored() {
        let text = "---\ntitle: Solo\nmarkmap:\n  maxWidth: 300\n---\n# Solo";
        assert_eq!(to_csv(text), to_csv("# Solo"));
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert_eq!(to_csv(""), "");
        assert_eq!(to_csv("\n\n   \n"), "");
        assert_eq!(to_csv("---\ntitle: x\n---\n"), "");
        assert!(flatten("", &FlattenOptions::default()).is_empty());
    }

    #[test]
    fn input_without_outline_nodes_has_no_rows() {
        let text = "Just a paragraph.\n\n1. numbered\n* starred";
        assert_eq!(to_csv(text), "");
    }

    #[test]
    fn strictly_descending_outline_is_one_row() {
        let text = "# A\n## B\n- c\n    - d\n        - e\n            - f";
        let table = flatten(text, &FlattenOptions::default());
        assert_eq!(table.len(), 1);
        assert_eq!(to_csv(text), "A,B,c,d,e,f");
    }

    #[test]
    fn siblings_share_ancestors() {
        let text = "# A\n## B\n- x\n- y\n- z";
        assert_eq!(to_csv(text), "A,B,x\nA,B,y\nA,B,z");
    }

    #[test]
    fn no_row_spans_two_roots() {
        let text = "# First\n## B\n- x\n# Second\n## D\n- y";
        let table = flatten(text, &FlattenOptions::default());
        assert!(
            table
                .rows()
                .iter()
                .all(|row| !(row.fields().contains(&"First".to_string())
                    && row.fields().contains(&"Second".to_string())))
        );
        // the open branch under the first root is discarded by the reset
        assert_eq!(to_csv(text), "Second,D,y");
    }

    #[test]
    fn ignored_lines_do_not_affect_paths() {
        let text = "# A\n\nSome prose.\n## B\n\n- x\n  continuation text\n- y";
        assert_eq!(to_csv(text), "A,B,x\nA,B,y");
    }

    #[test]
    fn tabs_count_as_one_step() {
        let text = "# A\n## B\n- x\n\t- y\n\t\t- z";
        assert_eq!(to_csv(text), "A,B,x,y,z");
    }

    #[test]
    fn crlf_input() {
        let text = "---\r\ntitle: x\r\n---\r\n# A\r\n## B\r\n- x\r\n- y\r\n";
        assert_eq!(to_csv(text), "A,B,x\nA,B,y");
    }

    #[test]
    fn heading_without_space_loses_first_character() {
        assert_eq!(to_csv("#A\n## B"), ",B");
        assert_eq!(to_csv("# A\n##Bee"), "A,ee");

        let trimmed = FlattenOptions {
            heading_text: HeadingText::Trimmed,
            ..FlattenOptions::default()
        };
        assert_eq!(convert("#A\n##Bee", &trimmed), "A,Bee");
    }

    #[test]
    fn partial_indentation_nests_siblings() {
        let text = "# A\n## B\n  - c\n  - d\n  - e\n## G";
        assert_eq!(to_csv(text), "A,B,c,d\nA,B,e\nA,G");

        let floor = FlattenOptions {
            indentation: Indentation::Floor,
            ..FlattenOptions::default()
        };
        assert_eq!(convert(text, &floor), "A,B,c\nA,B,d\nA,B,e\nA,G");
    }

    #[test]
    fn partial_indentation_grows_until_closed() {
        let text = "# A\n## B\n      - w\n      - x\n      - y\n      - z";
        assert_eq!(to_csv(text), "A,B,w,x,y\nA,B,w,z");
    }

    #[test]
    fn quoting_protects_embedded_delimiters() {
        let text = "# A\n## B\n- one, two\n- plain";
        assert_eq!(to_csv(text), "A,B,one, two\nA,B,plain");

        let quoted = FlattenOptions {
            quoting: Quoting::Necessary,
            ..FlattenOptions::default()
        };
        assert_eq!(convert(text, &quoted), "A,B,\"one, two\"\nA,B,plain");
    }

    #[test]
    fn custom_delimiter() {
        let options = FlattenOptions {
            delimiter: Delimiter::new(';').unwrap(),
            ..FlattenOptions::default()
        };
        assert_eq!(convert("# A\n## B\n- x", &options), "A;B;x");
    }

    #[test]
    fn list_without_second_heading_nests_siblings() {
        assert_eq!(to_csv("# A\n- x\n- y"), "A,x,y");
        assert_eq!(to_csv("# A\n- x\n- y\n- z"), "A,x,y\nA,x,z");
    }

    #[test]
    fn deep_headings_share_depths_with_lists() {
        let text = "# A\n## B\n### C\n- d";
        assert_eq!(to_csv(text), "A,B,C\nA,B,d");
    }
}
