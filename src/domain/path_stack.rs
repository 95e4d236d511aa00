use super::{
    depth::Depth,
    table::{Row, Table},
};

/// The currently open root-to-node path, and the rows closed so far.
///
/// Nodes arrive in document order. A node that is not strictly deeper than
/// the open path proves the path's last node was a leaf, so the path is
/// emitted as a row and cut back to the new node's ancestors before the node
/// is appended.
///
/// Each flattening run owns its own stack; nothing is shared between runs.
#[derive(Debug, Default)]
pub struct PathStack {
    nodes: Vec<String>,
    rows: Vec<Row>,
}

impl PathStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The open path, root first.
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.nodes
    }

    /// The rows emitted so far, in emission order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Adds a node at `depth` to the outline.
    ///
    /// A root node discards the open path without emitting it. Otherwise, if
    /// the open path reaches at least as deep as `depth`, it is emitted and
    /// truncated to the node's ancestors. The node is then appended.
    pub fn push(&mut self, depth: Depth, text: impl Into<String>) {
        if depth.is_root() {
            self.nodes.clear();
        }

        let len = self.nodes.len();
        if depth.is_exceeded_by(len) {
            self.emit();
            self.nodes.truncate(depth.ancestors());
        } else if depth.is_reached_by(len) {
            self.emit();
            self.nodes.pop();
        }

        self.nodes.push(text.into());
    }

    /// Flushes the open path, if any, and returns the finished table.
    #[must_use]
    pub fn finish(mut self) -> Table {
        if !self.nodes.is_empty() {
            self.emit();
        }
        Table::new(self.rows)
    }

    fn emit(&mut self) {
        self.rows.push(Row::new(self.nodes.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::depth::Indentation;

    fn heading(level: usize) -> Depth {
        Depth::heading(level)
    }

    fn item(columns: usize) -> Depth {
        Depth::list_item(columns, Indentation::Fractional)
    }

    fn rows(table: &Table) -> Vec<Vec<&str>> {
        table
            .rows()
            .iter()
            .map(|row| row.fields().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn empty_stack_finishes_empty() {
        assert!(PathStack::new().finish().is_empty());
    }

    #[test]
    fn strictly_descending_path_is_one_row() {
        let mut stack = PathStack::new();
        stack.push(heading(1), "A");
        stack.push(heading(2), "B");
        stack.push(item(0), "c");
        stack.push(item(4), "d");
        stack.push(item(8), "e");
        assert!(stack.rows().is_empty());

        let table = stack.finish();
        assert_eq!(rows(&table), vec![vec!["A", "B", "c", "d", "e"]]);
    }

    #[test]
    fn sibling_closes_previous_leaf() {
        let mut stack = PathStack::new();
        stack.push(heading(1), "A");
        stack.push(heading(2), "B");
        stack.push(item(0), "first");

        stack.push(item(0), "second");
        assert_eq!(rows(&Table::new(stack.rows().to_vec())), vec![vec![
            "A", "B", "first"
        ]]);
        assert_eq!(stack.path(), ["A", "B", "second"]);
    }

    #[test]
    fn shallower_node_truncates_to_ancestors() {
        let mut stack = PathStack::new();
        stack.push(heading(1), "A");
        stack.push(heading(2), "B");
        stack.push(item(0), "c");
        stack.push(item(4), "d");

        stack.push(heading(2), "E");
        assert_eq!(stack.rows().len(), 1);
        assert_eq!(stack.path(), ["A", "E"]);
    }

    #[test]
    fn root_discards_open_path_without_emitting() {
        let mut stack = PathStack::new();
        stack.push(heading(1), "A");
        stack.push(heading(2), "B");
        stack.push(heading(1), "C");
        assert!(stack.rows().is_empty());
        assert_eq!(stack.path(), ["C"]);

        let table = stack.finish();
        assert_eq!(rows(&table), vec![vec!["C"]]);
    }

    #[test]
    fn list_without_second_heading_nests_siblings() {
        let mut stack = PathStack::new();
        stack.push(heading(1), "A");
        stack.push(item(0), "x");

        // depth 3 against a path of 2: nothing closes
        stack.push(item(0), "y");
        assert!(stack.rows().is_empty());
        assert_eq!(stack.path(), ["A", "x", "y"]);

        let table = stack.finish();
        assert_eq!(rows(&table), vec![vec!["A", "x", "y"]]);
    }

    #[test]
    fn fractional_siblings_nest_instead_of_closing() {
        let mut stack = PathStack::new();
        stack.push(heading(1), "A");
        stack.push(heading(2), "B");
        stack.push(item(2), "c");
        stack.push(item(2), "d");
        assert!(stack.rows().is_empty());
        assert_eq!(stack.path(), ["A", "B", "c", "d"]);

        stack.push(item(2), "e");
        assert_eq!(stack.path(), ["A", "B", "e"]);

        stack.push(heading(2), "G");
        let table = stack.finish();
        assert_eq!(rows(&table), vec![
            vec!["A", "B", "c", "d"],
            vec!["A", "B", "e"],
            vec!["A", "G"]
        ]);
    }

    #[test]
    fn fractional_path_grows_until_it_passes_the_depth() {
        let mut stack = PathStack::new();
        stack.push(heading(1), "A");
        stack.push(heading(2), "B");
        stack.push(item(6), "w");
        stack.push(item(6), "x");
        stack.push(item(6), "y");
        assert!(stack.rows().is_empty());
        assert_eq!(stack.path(), ["A", "B", "w", "x", "y"]);

        stack.push(item(6), "z");
        assert_eq!(rows(&Table::new(stack.rows().to_vec())), vec![vec![
            "A", "B", "w", "x", "y"
        ]]);
        assert_eq!(stack.path(), ["A", "B", "w", "z"]);
    }

    #[test]
    fn fractional_node_closes_deeper_path() {
        let mut stack = PathStack::new();
        stack.push(heading(1), "A");
        stack.push(heading(2), "B");
        stack.push(item(0), "c");
        stack.push(item(4), "d");

        // depth 3.5 against a path of 4: keep trunc(2.5) = 2 ancestors
        stack.push(item(2), "e");
        assert_eq!(stack.path(), ["A", "B", "e"]);
        assert_eq!(stack.rows().len(), 1);
    }
}
