//! Selection trees built from dot-delimited names.
//!
//! Both model identifiers (`root.sub.leaf`) and attribute paths
//! (`job.size.w`) are hierarchical. A [`Hierarchy`] turns a flat list of
//! such names into a forest in which every prefix appears once, in
//! first-seen order. Only leaves can be selected.

use std::collections::HashMap;
use std::fmt::Write as _;

/// One node of a [`Hierarchy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyNode {
    /// The last segment of the path.
    pub label: String,
    /// The full dot-delimited path.
    pub path: String,
    /// Index of the parent node.
    pub parent: Option<usize>,
    /// Indices of child nodes, in first-seen order.
    pub children: Vec<usize>,
}

impl HierarchyNode {
    /// Returns true if the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A forest of dot-delimited names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    index: HashMap<String, usize>,
    roots: Vec<usize>,
}

impl Hierarchy {
    /// Builds a hierarchy from dot-delimited names.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hierarchy = Self::default();
        for path in paths {
            hierarchy.insert(path.as_ref());
        }
        hierarchy
    }

    fn insert(&mut self, path: &str) {
        let mut parent: Option<usize> = None;
        let mut end = 0;
        for segment in path.split('.') {
            end += segment.len();
            let prefix = &path[..end];
            let id = match self.index.get(prefix) {
                Some(&id) => id,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(HierarchyNode {
                        label: segment.to_string(),
                        path: prefix.to_string(),
                        parent,
                        children: Vec::new(),
                    });
                    self.index.insert(prefix.to_string(), id);
                    match parent {
                        Some(p) => self.nodes[p].children.push(id),
                        None => self.roots.push(id),
                    }
                    id
                }
            };
            parent = Some(id);
            // Skip the separator.
            end += 1;
        }
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the hierarchy has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by its full path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&HierarchyNode> {
        self.index.get(path).map(|&id| &self.nodes[id])
    }

    /// Returns true if the path names an existing leaf.
    #[must_use]
    pub fn is_leaf(&self, path: &str) -> bool {
        self.get(path).is_some_and(HierarchyNode::is_leaf)
    }

    /// Returns true if the path names any node.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Returns the root nodes.
    pub fn roots(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.roots.iter().map(|&id| &self.nodes[id])
    }

    /// Returns the children of a node.
    pub fn children<'a>(&'a self, node: &'a HierarchyNode) -> impl Iterator<Item = &'a HierarchyNode> {
        node.children.iter().map(|&id| &self.nodes[id])
    }

    /// Returns the full paths of all leaves in depth-first order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&str> {
        self.depth_first()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.path.as_str())
            .collect()
    }

    /// Iterates `(depth, node)` pairs in depth-first, first-seen order.
    pub fn depth_first(&self) -> impl Iterator<Item = (usize, &HierarchyNode)> {
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|&id| (0, id)).collect();
        std::iter::from_fn(move || {
            let (depth, id) = stack.pop()?;
            let node = &self.nodes[id];
            stack.extend(node.children.iter().rev().map(|&child| (depth + 1, child)));
            Some((depth, node))
        })
    }

    /// Renders the forest as an indented outline.
    ///
    /// Leaves are marked with `*`, since only they can be selected.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (depth, node) in self.depth_first() {
            let marker = if node.is_leaf() { "*" } else { "+" };
            let _ = writeln!(out, "{:indent$}{marker} {}", "", node.label, indent = depth * 2);
        }
        out
    }
}
