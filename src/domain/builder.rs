//! Tree builder for turning indented program lines into a forest.

use generational_arena::Index;
use tracing::{instrument, trace};

use crate::domain::arena::Forest;

/// Constructs a [`Forest`] from indentation-structured lines.
///
/// Keeps a stack of open nodes ordered shallowest to deepest. A new line
/// closes every open node whose indent is greater than or equal to its own,
/// then becomes the last child of whatever remains on top.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    forest: Forest,
    stack: Vec<(usize, Index)>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest, numbering lines by their position in `lines`.
    pub fn build<'a, I>(lines: I) -> Forest
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::build_numbered(lines.into_iter().enumerate().map(|(i, l)| (i + 1, l)))
    }

    /// Build a forest from lines that carry their original line numbers.
    #[instrument(level = "debug", skip(lines))]
    pub fn build_numbered<'a, I>(lines: I) -> Forest
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut builder = Self::new();
        for (line_no, raw) in lines {
            builder.push_line(line_no, raw);
        }
        builder.finish()
    }

    /// Add one line. Blank lines are ignored.
    pub fn push_line(&mut self, line_no: usize, raw: &str) {
        let text = raw.trim();
        if text.is_empty() {
            return;
        }
        let indent = raw.chars().take_while(|c| c.is_whitespace()).count();

        while self
            .stack
            .last()
            .is_some_and(|&(open_indent, _)| open_indent >= indent)
        {
            self.stack.pop();
        }

        let parent = self.stack.last().map(|&(_, idx)| idx);
        trace!(line_no, indent, ?parent, "node: {}", text);
        let idx = self
            .forest
            .insert_node(indent, text.to_string(), line_no, parent);
        self.stack.push((indent, idx));
    }

    pub fn finish(self) -> Forest {
        self.forest
    }
}
