//! Two-pass relationship extraction.
//!
//! ## Pass 1: declarations
//!
//! Imports, classes, functions and methods are recorded, and every class name
//! goes into the known-class set.
//!
//! ## Pass 2: usages
//!
//! Every call of a plain name is recorded as a class instantiation if the
//! name is a known class, otherwise as a function call.
//!
//! Pass 1 must finish before pass 2 starts: a class used above its
//! definition still has to be recognized as an instantiation.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::languages::get_language_support;
use crate::scope::{Enclosure, enclosing, enclosing_function};
use crate::tree::{Node, NodeKind, SyntaxTree};
use crate::types::{RelationshipKind, RelationshipRecord, RelationshipSet};
use crate::walker::traverse;

/// Names of every class declared in the current file, at any depth.
#[derive(Debug, Default)]
struct KnownClasses(HashSet<String>);

impl KnownClasses {
    fn insert(&mut self, name: &str) {
        self.0.insert(name.to_string());
    }

    fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

/// Extract all relationships from a parsed tree.
///
/// Never fails: node shapes that cannot be interpreted (missing names,
/// error regions, attribute callees) contribute nothing.
#[must_use]
pub fn extract(tree: &SyntaxTree) -> RelationshipSet {
    let cx = Context::new(tree);
    let mut set = RelationshipSet::default();

    let known = cx.collect_declarations(&mut set);
    cx.collect_usages(&known, &mut set);

    debug!(
        file = %tree.file_name(),
        imports = set.module_import.len() + set.module_import_from.len(),
        classes = set.class_definition.len(),
        functions = set.function_definition.len(),
        methods = set.method_definition.len(),
        calls = set.function_call.len(),
        instantiations = set.class_instantiation.len(),
        "Extracted relationships"
    );

    set
}

/// Per-tree lookup state shared by both passes.
struct Context<'t> {
    tree: &'t SyntaxTree,
    name_field: &'static str,
    callee_field: &'static str,
}

impl<'t> Context<'t> {
    fn new(tree: &'t SyntaxTree) -> Self {
        let support = get_language_support(tree.language());
        Self {
            tree,
            name_field: support.name_field(),
            callee_field: support.callee_field(),
        }
    }

    fn file_name(&self) -> &'t str {
        self.tree.file_name()
    }

    /// Pass 1: imports and definitions. Returns the completed class set.
    fn collect_declarations(&self, set: &mut RelationshipSet) -> KnownClasses {
        let mut known = KnownClasses::default();

        for node in traverse(self.tree.root()) {
            match node.kind() {
                NodeKind::Import => {
                    self.record_import(RelationshipKind::ModuleImport, node, set);
                }
                NodeKind::ImportFrom => {
                    self.record_import(RelationshipKind::ModuleImportFrom, node, set);
                }
                NodeKind::ClassDefinition => {
                    let Some(name) = self.declared_name(node) else {
                        continue;
                    };
                    known.insert(name);
                    set.push(RelationshipRecord::new(
                        RelationshipKind::ClassDefinition,
                        self.file_name(),
                        name,
                        node.location(),
                    ));
                }
                NodeKind::FunctionDefinition => self.record_function(node, set),
                _ => {}
            }
        }

        known
    }

    /// Pass 2: call sites, classified against the completed class set.
    fn collect_usages(&self, known: &KnownClasses, set: &mut RelationshipSet) {
        for node in traverse(self.tree.root()) {
            if node.kind() != NodeKind::Call {
                continue;
            }
            let Some(callee) = self.invoked_name(node) else {
                trace!(
                    location = ?node.location(),
                    text = node.text(),
                    "Skipping call without a plain-name callee"
                );
                continue;
            };

            let caller = enclosing_function(node)
                .map_or(Some(self.file_name()), |function| self.declared_name(function));
            let Some(caller) = caller else {
                trace!(callee, "Skipping call inside an unnamed function");
                continue;
            };

            let kind = if known.contains(callee) {
                RelationshipKind::ClassInstantiation
            } else {
                RelationshipKind::FunctionCall
            };
            set.push(RelationshipRecord::new(kind, caller, callee, node.location()));
        }
    }

    fn record_import(&self, kind: RelationshipKind, node: Node<'t>, set: &mut RelationshipSet) {
        let text = node.text();
        if text.trim().is_empty() {
            return;
        }
        set.push(RelationshipRecord::new(
            kind,
            self.file_name(),
            text,
            node.location(),
        ));
    }

    fn record_function(&self, node: Node<'t>, set: &mut RelationshipSet) {
        let Some(name) = self.declared_name(node) else {
            return;
        };

        let record = match enclosing(node) {
            Enclosure::Class(class) => {
                let Some(class_name) = self.declared_name(class) else {
                    trace!(method = name, "Skipping method of an unnamed class");
                    return;
                };
                RelationshipRecord::new(
                    RelationshipKind::MethodDefinition,
                    class_name,
                    name,
                    node.location(),
                )
            }
            Enclosure::Function(_) | Enclosure::Module => RelationshipRecord::new(
                RelationshipKind::FunctionDefinition,
                self.file_name(),
                name,
                node.location(),
            ),
        };
        set.push(record);
    }

    /// Declared name of a class or function definition.
    fn declared_name(&self, definition: Node<'t>) -> Option<&'t str> {
        let name = definition.child_by_field(self.name_field);
        plain_identifier(name).or_else(|| {
            trace!(
                location = ?definition.location(),
                kind = definition.grammar_kind(),
                "Skipping definition without a usable name"
            );
            None
        })
    }

    /// Invoked name of a call, if the callee is a bare identifier.
    fn invoked_name(&self, call: Node<'t>) -> Option<&'t str> {
        plain_identifier(call.child_by_field(self.callee_field))
    }
}

fn plain_identifier(node: Option<Node<'_>>) -> Option<&str> {
    node.filter(|n| n.kind() == NodeKind::Identifier)
        .map(|n| n.text())
        .filter(|text| !text.is_empty())
}
