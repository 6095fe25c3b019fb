//! Ordered artifact trees
//!
//! [`ArtifactTree`] is either empty or a single [`TreeNode`] root. Each node
//! owns its children, so a tree can never hold dangling fragments: anything
//! reachable is connected to the root by construction.

use crate::digest::TreeDigest;
use crate::element::{ElementKind, TestElement};
use crate::path::TreePath;
use serde::{Deserialize, Serialize};

/// One node of an artifact tree and the subtrees below it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    element: TestElement,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create leaf node
    #[inline]
    #[must_use]
    pub fn new(element: TestElement) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn element(&self) -> &TestElement {
        &self.element
    }

    #[inline]
    pub fn element_mut(&mut self) -> &mut TestElement {
        &mut self.element
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&TreeNode> {
        self.children.get(index)
    }

    #[inline]
    pub fn child_mut(&mut self, index: usize) -> Option<&mut TreeNode> {
        self.children.get_mut(index)
    }

    /// Append child subtree
    #[inline]
    pub fn push_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// Insert child subtree at `index`
    ///
    /// # Errors
    /// Returns error if `index` is greater than the number of children
    pub fn insert_child(&mut self, index: usize, child: TreeNode) -> Result<(), TreeError> {
        if index > self.children.len() {
            return Err(TreeError::IndexOutOfBounds {
                index,
                len: self.children.len(),
            });
        }
        self.children.insert(index, child);
        Ok(())
    }

    /// Detach child subtree at `index`
    #[inline]
    pub fn remove_child(&mut self, index: usize) -> Option<TreeNode> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// Keep only children matching `keep`
    #[inline]
    pub fn retain_children(&mut self, keep: impl FnMut(&TreeNode) -> bool) {
        self.children.retain(keep);
    }

    /// Append the root of `fragment` as last child
    ///
    /// Returns `false` (and changes nothing) if the fragment is empty.
    pub fn attach(&mut self, fragment: ArtifactTree) -> bool {
        match fragment.into_root() {
            Some(root) => {
                self.children.push(root);
                true
            }
            None => false,
        }
    }

    /// Number of nodes in this subtree, including `self`
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Split into payload and child subtrees
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (TestElement, Vec<TreeNode>) {
        (self.element, self.children)
    }

    fn visit_mut(&mut self, path: &TreePath, f: &mut impl FnMut(&TreePath, &mut TreeNode)) {
        f(path, self);
        for (i, child) in self.children.iter_mut().enumerate() {
            child.visit_mut(&path.child(i), f);
        }
    }
}

impl From<TestElement> for TreeNode {
    fn from(element: TestElement) -> Self {
        Self::new(element)
    }
}

/// Ordered tree of test-plan elements
///
/// # Invariants
/// - Empty, or exactly one root
/// - Child order is significant and preserved by every operation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtifactTree {
    root: Option<TreeNode>,
}

impl ArtifactTree {
    /// Tree with no nodes
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self { root: None }
    }

    /// Single-node tree
    #[inline]
    #[must_use]
    pub fn new(root: TestElement) -> Self {
        Self {
            root: Some(TreeNode::new(root)),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    #[inline]
    pub fn root_mut(&mut self) -> Option<&mut TreeNode> {
        self.root.as_mut()
    }

    #[inline]
    #[must_use]
    pub fn into_root(self) -> Option<TreeNode> {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total number of nodes
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, TreeNode::node_count)
    }

    /// Node at `path`
    #[must_use]
    pub fn get(&self, path: &TreePath) -> Option<&TreeNode> {
        let mut node = self.root.as_ref()?;
        for &index in path.indices() {
            node = node.child(index)?;
        }
        Some(node)
    }

    /// Mutable node at `path`
    pub fn get_mut(&mut self, path: &TreePath) -> Option<&mut TreeNode> {
        let mut node = self.root.as_mut()?;
        for &index in path.indices() {
            node = node.child_mut(index)?;
        }
        Some(node)
    }

    /// Append the root of `fragment` below the node at `parent`
    ///
    /// Returns the path of the attached subtree, or `None` if the fragment was
    /// empty.
    ///
    /// # Errors
    /// Returns error if there is no node at `parent`
    pub fn attach(
        &mut self,
        parent: &TreePath,
        fragment: ArtifactTree,
    ) -> Result<Option<TreePath>, TreeError> {
        let node = self
            .get_mut(parent)
            .ok_or_else(|| TreeError::NoSuchNode(parent.clone()))?;
        let index = node.children().len();
        Ok(node.attach(fragment).then(|| parent.child(index)))
    }

    /// Insert `node` as child number `index` of the node at `parent`
    ///
    /// # Errors
    /// Returns error if there is no node at `parent` or `index` is out of bounds
    pub fn insert(
        &mut self,
        parent: &TreePath,
        index: usize,
        node: TreeNode,
    ) -> Result<TreePath, TreeError> {
        let parent_node = self
            .get_mut(parent)
            .ok_or_else(|| TreeError::NoSuchNode(parent.clone()))?;
        parent_node.insert_child(index, node)?;
        Ok(parent.child(index))
    }

    /// Detach the subtree at `path`
    ///
    /// Removing the root leaves an empty tree.
    pub fn remove(&mut self, path: &TreePath) -> Option<TreeNode> {
        match (path.parent(), path.last()) {
            (Some(parent), Some(index)) => self.get_mut(&parent)?.remove_child(index),
            _ => self.root.take(),
        }
    }

    /// Pre-order traversal with node paths
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            stack: self
                .root
                .as_ref()
                .map(|root| (TreePath::root(), root))
                .into_iter()
                .collect(),
        }
    }

    /// Paths of all nodes matching `predicate`, in pre-order
    #[must_use]
    pub fn find_paths(&self, mut predicate: impl FnMut(&TreeNode) -> bool) -> Vec<TreePath> {
        self.depth_first()
            .filter(|(_, node)| predicate(node))
            .map(|(path, _)| path)
            .collect()
    }

    /// Paths of all nodes of the given kind, in pre-order
    #[must_use]
    pub fn find_by_kind(&self, kind: ElementKind) -> Vec<TreePath> {
        self.find_paths(|node| node.element().kind() == kind)
    }

    /// Visit every node mutably, in pre-order
    ///
    /// A node's children are visited after `f` has run on the node, so
    /// children added by `f` are visited as well.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&TreePath, &mut TreeNode)) {
        if let Some(root) = self.root.as_mut() {
            root.visit_mut(&TreePath::root(), &mut f);
        }
    }

    /// Structural digest
    #[must_use]
    pub fn digest(&self) -> TreeDigest {
        self.root
            .as_ref()
            .map_or_else(TreeDigest::empty, TreeDigest::of_node)
    }
}

impl From<TreeNode> for ArtifactTree {
    fn from(root: TreeNode) -> Self {
        Self { root: Some(root) }
    }
}

impl From<TestElement> for ArtifactTree {
    fn from(root: TestElement) -> Self {
        Self::new(root)
    }
}

/// Pre-order iterator over `(path, node)` pairs
#[derive(Debug)]
pub struct DepthFirst<'a> {
    stack: Vec<(TreePath, &'a TreeNode)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (TreePath, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        for (i, child) in node.children().iter().enumerate().rev() {
            self.stack.push((path.child(i), child));
        }
        Some((path, node))
    }
}

/// Errors related to tree edits
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// No node at the given path
    #[error("no node at {0}")]
    NoSuchNode(TreePath),

    /// Child index past the end
    #[error("child index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}
