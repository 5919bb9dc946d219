//! Preorder traversal over a [`SyntaxTree`](crate::tree::SyntaxTree).
//!
//! Every call to [`traverse`] builds an independent iterator with its own
//! stack, so traversals can be restarted or run side by side over the same
//! tree.

use std::iter::FusedIterator;

use crate::tree::Node;

/// Preorder iterator: a node precedes its children, children are visited in
/// source order.
#[derive(Debug, Clone)]
pub struct Preorder<'t> {
    stack: Vec<Node<'t>>,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the leftmost child is popped first
        self.stack.extend(node.children().rev());
        Some(node)
    }
}

impl FusedIterator for Preorder<'_> {}

/// Traverse every node reachable from `node`, including `node` itself.
#[must_use]
pub fn traverse(node: Node<'_>) -> Preorder<'_> {
    Preorder { stack: vec![node] }
}

/// Parent of `node`; `None` only for the root.
#[must_use]
pub fn parent_of<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    node.parent()
}

/// Ancestors of `node`, nearest first, excluding `node` itself.
pub fn ancestors<'t>(node: Node<'t>) -> impl Iterator<Item = Node<'t>> {
    std::iter::successors(node.parent(), Node::parent)
}
