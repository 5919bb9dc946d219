//! Python language support for Skein.
//!
//! Classifies tree-sitter-python node kinds for relationship extraction.

use super::LanguageSupport;
use crate::tree::NodeKind;
use crate::types::Language;

/// Tree-sitter node kind constants for the Python grammar.
///
/// These match the node types defined in tree-sitter-python.
mod node_kinds {
    pub const MODULE: &str = "module";
    pub const IMPORT_STATEMENT: &str = "import_statement";
    pub const IMPORT_FROM_STATEMENT: &str = "import_from_statement";
    pub const FUTURE_IMPORT_STATEMENT: &str = "future_import_statement";
    pub const CLASS_DEFINITION: &str = "class_definition";
    pub const FUNCTION_DEFINITION: &str = "function_definition";
    pub const CALL: &str = "call";
    pub const IDENTIFIER: &str = "identifier";
    pub const ERROR: &str = "ERROR";
}

/// Python language support implementation.
pub struct PythonLanguage;

impl LanguageSupport for PythonLanguage {
    fn extensions(&self) -> &[&str] {
        Language::Python.extensions()
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn classify(&self, grammar_kind: &str) -> NodeKind {
        use node_kinds::{
            CALL, CLASS_DEFINITION, ERROR, FUNCTION_DEFINITION, FUTURE_IMPORT_STATEMENT,
            IDENTIFIER, IMPORT_FROM_STATEMENT, IMPORT_STATEMENT, MODULE,
        };

        match grammar_kind {
            MODULE => NodeKind::Module,
            IMPORT_STATEMENT => NodeKind::Import,
            // `from __future__ import x` is a selective import too
            IMPORT_FROM_STATEMENT | FUTURE_IMPORT_STATEMENT => NodeKind::ImportFrom,
            CLASS_DEFINITION => NodeKind::ClassDefinition,
            // `async def` shares the node kind
            FUNCTION_DEFINITION => NodeKind::FunctionDefinition,
            CALL => NodeKind::Call,
            IDENTIFIER => NodeKind::Identifier,
            ERROR => NodeKind::Error,
            _ => NodeKind::Other,
        }
    }
}
