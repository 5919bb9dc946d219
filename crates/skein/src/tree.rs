//! Arena-backed concrete syntax tree.
//!
//! A tree-sitter tree is flattened into a `Vec<NodeData>` owned by
//! [`SyntaxTree`]. Children and parents are referenced by [`NodeId`] index,
//! so ownership is strictly top-down from the tree and parent links are plain
//! lookups.
//!
//! [`Node`] is a cheap `Copy` handle (tree reference + id) used for all
//! read-only queries.

use std::ops::Range;
use std::path::Path;

use crate::error::{Error, Result};
use crate::languages::{LanguageSupport, get_language_support, tree_sitter_utils::node_location};
use crate::types::{Language, Location};

/// Closed vocabulary of node kinds the extractor distinguishes.
///
/// Languages map their grammar kinds onto these variants; everything the
/// extractor does not recognize is [`NodeKind::Other`] and stays inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a source file
    Module,
    /// Whole-module import (`import x`)
    Import,
    /// Selective import (`from x import y`)
    ImportFrom,
    /// Class declaration
    ClassDefinition,
    /// Function or method declaration
    FunctionDefinition,
    /// Invocation with an argument list
    Call,
    /// Bare name
    Identifier,
    /// Unparsable region or a node the parser had to invent
    Error,
    /// Any other grammar construct
    Other,
}

impl NodeKind {
    /// Whether this kind opens a lexical scope for classification.
    #[must_use]
    pub fn is_scope(self) -> bool {
        matches!(self, Self::ClassDefinition | Self::FunctionDefinition)
    }
}

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: Self = Self(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena entry for one node.
#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    grammar_kind: &'static str,
    field: Option<&'static str>,
    location: Location,
    byte_range: Range<usize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An immutable syntax tree for exactly one source file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    file_name: String,
    language: Language,
    source: String,
    nodes: Vec<NodeData>,
    has_errors: bool,
}

impl SyntaxTree {
    /// Parse in-memory source text.
    ///
    /// Always succeeds for well-formed parser setup: syntactically invalid
    /// input produces a tree containing [`NodeKind::Error`] nodes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parser` if the tree-sitter grammar cannot be loaded.
    pub fn parse_source(
        file_name: impl Into<String>,
        source: impl Into<String>,
        language: Language,
    ) -> Result<Self> {
        let file_name = file_name.into();
        let source = source.into();
        let support = get_language_support(language);

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&support.tree_sitter_language())
            .map_err(|e| Error::Parser(e.to_string()))?;

        let ts_tree = parser
            .parse(&source, None)
            .ok_or_else(|| Error::Parser(format!("tree-sitter returned no tree for {file_name}")))?;

        let has_errors = ts_tree.root_node().has_error();
        let nodes = flatten(&ts_tree, support);

        tracing::debug!(
            file = %file_name,
            language = language.as_str(),
            nodes = nodes.len(),
            has_errors,
            "Parsed source"
        );
        if has_errors {
            tracing::warn!(
                file = %file_name,
                "Source contains syntax errors; extraction is best-effort"
            );
        }

        Ok(Self {
            file_name,
            language,
            source,
            nodes,
            has_errors,
        })
    }

    /// Read and parse a file.
    ///
    /// Bytes that are not valid UTF-8 are replaced before parsing so node
    /// offsets always agree with [`SyntaxTree::source`].
    ///
    /// # Errors
    ///
    /// Returns `Error::FileAccess` if the path does not exist, is not
    /// readable, or is a directory. Returns `Error::Parser` on grammar setup
    /// failure.
    pub fn parse_file(path: &Path, language: Language) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::file_access(path, e))?;
        let source = String::from_utf8_lossy(&bytes).into_owned();
        Self::parse_source(file_basename(path), source, language)
    }

    /// Basename of the source file; the file's identity as a `caller`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Language the tree was parsed as.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the parser reported error or missing nodes.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Number of nodes (named and anonymous).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes. A parsed tree always has its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.node(NodeId::ROOT)
    }

    /// Handle for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Node<'_> {
        assert!(id.index() < self.nodes.len(), "node id out of range");
        Node { tree: self, id }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// Basename of `path`, or the whole path if it has none.
fn file_basename(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Copy a tree-sitter tree into a preorder arena.
///
/// Iterative so deeply nested sources cannot overflow the stack.
// Node counts are bounded by source size, far below u32::MAX.
#[allow(clippy::cast_possible_truncation)]
fn flatten(ts_tree: &tree_sitter::Tree, support: &dyn LanguageSupport) -> Vec<NodeData> {
    let mut nodes: Vec<NodeData> = Vec::new();
    let mut cursor = ts_tree.walk();
    // Top of stack is the parent of the cursor's current node
    let mut parents: Vec<NodeId> = Vec::new();

    loop {
        let ts_node = cursor.node();
        let id = NodeId(nodes.len() as u32);
        let parent = parents.last().copied();

        let kind = if ts_node.is_error() || ts_node.is_missing() {
            NodeKind::Error
        } else {
            support.classify(ts_node.kind())
        };

        nodes.push(NodeData {
            kind,
            grammar_kind: ts_node.kind(),
            field: cursor.field_name(),
            location: node_location(&ts_node),
            byte_range: ts_node.byte_range(),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            nodes[parent.index()].children.push(id);
        }

        if cursor.goto_first_child() {
            parents.push(id);
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return nodes;
            }
            parents.pop();
        }
    }
}

/// Read-only handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    /// Arena id of this node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Classified kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.tree.data(self.id).kind
    }

    /// Raw grammar kind (e.g. `"function_definition"`).
    #[must_use]
    pub fn grammar_kind(&self) -> &'static str {
        self.tree.data(self.id).grammar_kind
    }

    /// Field name under the parent, if the grammar assigns one.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        self.tree.data(self.id).field
    }

    /// Start and end positions.
    #[must_use]
    pub fn location(&self) -> Location {
        self.tree.data(self.id).location
    }

    /// Source text covered by this node.
    #[must_use]
    pub fn text(&self) -> &'t str {
        let range = self.tree.data(self.id).byte_range.clone();
        self.tree.source.get(range).unwrap_or_default()
    }

    /// Parent node; `None` only for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Node<'t>> {
        self.tree.data(self.id).parent.map(|id| self.tree.node(id))
    }

    /// Children in source order.
    pub fn children(self) -> impl DoubleEndedIterator<Item = Node<'t>> + ExactSizeIterator + 't {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| tree.node(id))
    }

    /// First child stored under `field`.
    #[must_use]
    pub fn child_by_field(self, field: &str) -> Option<Node<'t>> {
        self.children().find(|child| child.field() == Some(field))
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.grammar_kind())
            .field("location", &self.location())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn parse(code: &str) -> SyntaxTree {
        SyntaxTree::parse_source("test.py", code, Language::Python)
            .expect("parsing test code should succeed")
    }

    #[test]
    fn root_is_module_without_parent() {
        let tree = parse("x = 1\n");
        let root = tree.root();

        assert_eq!(root.kind(), NodeKind::Module);
        assert_eq!(root.id(), NodeId::ROOT);
        assert!(root.parent().is_none());
    }

    #[test]
    fn only_definitions_open_scopes() {
        assert!(NodeKind::ClassDefinition.is_scope());
        assert!(NodeKind::FunctionDefinition.is_scope());
        assert!(!NodeKind::Module.is_scope());
        assert!(!NodeKind::Call.is_scope());
        assert!(!NodeKind::Error.is_scope());
    }

    #[test]
    fn empty_source_has_only_root() {
        let tree = parse("");

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().children().len(), 0);
        assert!(!tree.has_errors());
    }

    #[test]
    fn parent_links_agree_with_children() {
        let tree = parse("class A:\n    def f(self):\n        g(1)\n");

        for index in 0..tree.len() {
            let node = tree.node(NodeId(u32::try_from(index).expect("small tree")));
            for child in node.children() {
                assert_eq!(child.parent(), Some(node));
            }
        }
    }

    #[test]
    fn name_field_resolves_identifier() {
        let tree = parse("def handler():\n    pass\n");
        let function = tree.root().children().next().expect("function node");

        assert_eq!(function.kind(), NodeKind::FunctionDefinition);
        let name = function.child_by_field("name").expect("name field");
        assert_eq!(name.kind(), NodeKind::Identifier);
        assert_eq!(name.text(), "handler");
    }

    #[test]
    fn locations_are_zero_indexed() {
        let tree = parse("import os\nimport sys\n");
        let second = tree.root().children().nth(1).expect("second import");

        assert_eq!(second.kind(), NodeKind::Import);
        assert_eq!(second.location().start(), Position::new(1, 0));
        assert_eq!(second.location().end(), Position::new(1, 10));
        assert_eq!(second.text(), "import sys");
    }

    #[test]
    fn malformed_source_yields_error_nodes() {
        let tree = parse("def broken(:\n    pass\n");

        assert!(tree.has_errors());
        let has_error_node = (0..tree.len())
            .any(|i| tree.node(NodeId(u32::try_from(i).expect("small tree"))).kind() == NodeKind::Error);
        assert!(has_error_node);
    }

    #[test]
    fn file_basename_strips_directories() {
        assert_eq!(file_basename(Path::new("/tmp/pkg/mod.py")), "mod.py");
        assert_eq!(file_basename(Path::new("mod.py")), "mod.py");
    }

    #[test]
    fn parse_file_missing_is_file_access_error() {
        let err = SyntaxTree::parse_file(Path::new("/nonexistent/path/file.py"), Language::Python)
            .expect_err("missing file should fail");
        assert!(err.is_file_access());
    }

    #[test]
    fn parse_file_directory_is_file_access_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = SyntaxTree::parse_file(dir.path(), Language::Python)
            .expect_err("directory should fail");
        assert!(err.is_file_access());
    }

    #[test]
    fn parse_file_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("latin1.py");
        std::fs::write(&path, b"# caf\xe9\nimport os\n").expect("write file");

        let tree = SyntaxTree::parse_file(&path, Language::Python).expect("should parse");
        assert_eq!(tree.file_name(), "latin1.py");
        assert!(tree.source().contains('\u{FFFD}'));
    }
}
