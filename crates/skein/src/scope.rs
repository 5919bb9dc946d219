//! Lexical scope classification.
//!
//! Scope is decided purely by walking parent links to the nearest class or
//! function definition. Intermediate constructs (blocks, decorators, `if`
//! bodies, error regions) are transparent.
//!
//! A definition is a *method* only when its nearest enclosure is a class. A
//! function nested in another function is never a method, even if a class
//! sits further up the chain:
//!
//! ```text
//! class A:
//!     def method(self):      # nearest enclosure: class A  -> method
//!         def helper():      # nearest enclosure: method   -> function
//!             pass
//! ```

use crate::tree::{Node, NodeKind};
use crate::walker::ancestors;

/// Kind of lexical enclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Top level of the file
    Module,
    /// Inside a class body
    Class,
    /// Inside a function or method body
    Function,
}

/// Nearest lexical enclosure of a node, with the enclosing definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enclosure<'t> {
    /// No class or function encloses the node
    Module,
    /// Nearest enclosure is this class definition
    Class(Node<'t>),
    /// Nearest enclosure is this function definition
    Function(Node<'t>),
}

impl<'t> Enclosure<'t> {
    /// Kind of this enclosure.
    #[must_use]
    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Module => ScopeKind::Module,
            Self::Class(_) => ScopeKind::Class,
            Self::Function(_) => ScopeKind::Function,
        }
    }

    /// The enclosing definition node, if any.
    #[must_use]
    pub fn definition(&self) -> Option<Node<'t>> {
        match self {
            Self::Module => None,
            Self::Class(node) | Self::Function(node) => Some(*node),
        }
    }
}

/// Find the nearest enclosing class or function definition of `node`.
#[must_use]
pub fn enclosing(node: Node<'_>) -> Enclosure<'_> {
    match ancestors(node).find(|ancestor| ancestor.kind().is_scope()) {
        Some(class) if class.kind() == NodeKind::ClassDefinition => Enclosure::Class(class),
        Some(function) => Enclosure::Function(function),
        None => Enclosure::Module,
    }
}

/// Kind of the nearest enclosure of `node`.
#[must_use]
pub fn enclosing_kind(node: Node<'_>) -> ScopeKind {
    enclosing(node).kind()
}

/// Whether the nearest enclosure of `definition` is a class.
///
/// Decides whether a function definition is a method.
#[must_use]
pub fn is_directly_inside_class(definition: Node<'_>) -> bool {
    enclosing_kind(definition) == ScopeKind::Class
}

/// Nearest enclosing function definition, looking through classes.
///
/// Used to attribute call sites. `None` means the call happens outside any
/// function (module level or directly in a class body).
#[must_use]
pub fn enclosing_function(node: Node<'_>) -> Option<Node<'_>> {
    ancestors(node).find(|ancestor| ancestor.kind() == NodeKind::FunctionDefinition)
}
