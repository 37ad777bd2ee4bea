use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

/// One program line and the nodes nested beneath it.
#[derive(Debug, Clone)]
pub struct ProgramNode {
    /// Number of leading whitespace characters
    pub indent: usize,
    /// Trimmed line content
    pub text: String,
    /// 1-based source line
    pub line: usize,
    /// Indices of child nodes in document order
    pub children: Vec<Index>,
}

/// Ordered collection of top-level program nodes.
///
/// All nodes live in a generational arena; the forest only hands out shared
/// references, so a built forest stays unchanged for the rest of a run.
#[derive(Debug, Default)]
pub struct Forest {
    arena: Arena<ProgramNode>,
    roots: Vec<Index>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node below `parent`, or as a new root.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(
        &mut self,
        indent: usize,
        text: String,
        line: usize,
        parent: Option<Index>,
    ) -> Index {
        let node = ProgramNode {
            indent,
            text,
            line,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent) => parent.children.push(node_idx),
            None => self.roots.push(node_idx),
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&ProgramNode> {
        self.arena.get(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order, document-order traversal over every node.
    pub fn iter(&self) -> ForestIterator<'_> {
        ForestIterator::new(self)
    }

    /// Post-order traversal: children before their parent.
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Nesting depth; 0 for an empty forest, 1 for a flat program.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut depths = std::collections::HashMap::new();
        let mut max_depth = 0;
        for (idx, node) in self.iter_postorder() {
            let depth = 1 + node
                .children
                .iter()
                .filter_map(|c| depths.get(c))
                .max()
                .copied()
                .unwrap_or(0);
            depths.insert(idx, depth);
            max_depth = max_depth.max(depth);
        }
        max_depth
    }

    /// Render each root as a `termtree` for display.
    pub fn to_trees(&self) -> Vec<Tree<String>> {
        self.roots
            .iter()
            .filter_map(|&root| self.to_tree(root))
            .collect()
    }

    fn to_tree(&self, idx: Index) -> Option<Tree<String>> {
        let node = self.get_node(idx)?;
        let leaves: Vec<_> = node
            .children
            .iter()
            .filter_map(|&child| self.to_tree(child))
            .collect();
        Some(Tree::new(format!("{}: {}", node.line, node.text)).with_leaves(leaves))
    }
}

pub struct ForestIterator<'a> {
    forest: &'a Forest,
    stack: Vec<Index>,
}

impl<'a> ForestIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        // Push roots in reverse order for left-to-right traversal
        let stack = forest.roots.iter().rev().copied().collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for ForestIterator<'a> {
    type Item = (Index, &'a ProgramNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    forest: &'a Forest,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        let stack = forest.roots.iter().rev().map(|&r| (r, false)).collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a ProgramNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
