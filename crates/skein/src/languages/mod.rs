//! Language-specific syntax vocabulary.
//!
//! Each supported language implements the `LanguageSupport` trait, which tells
//! the parser adapter which tree-sitter grammar to load and how grammar node
//! kinds map onto the closed [`NodeKind`] vocabulary the extractor matches on.
//!
//! ## Adding a New Language
//!
//! 1. Add the variant to `Language` enum in `types.rs`
//! 2. Create a new module (e.g., `javascript.rs`)
//! 3. Implement `LanguageSupport` trait
//! 4. Register in `get_language_support()`

pub mod python;
pub(crate) mod tree_sitter_utils;

use crate::tree::NodeKind;
use crate::types::Language;

/// Get the language support implementation for a language.
#[must_use]
pub fn get_language_support(lang: Language) -> &'static dyn LanguageSupport {
    match lang {
        Language::Python => &python::PythonLanguage,
    }
}

/// Trait for language-specific syntax classification.
pub trait LanguageSupport: Send + Sync {
    /// File extensions this language handles.
    fn extensions(&self) -> &[&str];

    /// Get the tree-sitter language for parsing.
    fn tree_sitter_language(&self) -> tree_sitter::Language;

    /// Map a grammar node kind onto the extractor's vocabulary.
    ///
    /// Kinds the extractor does not care about map to [`NodeKind::Other`].
    fn classify(&self, grammar_kind: &str) -> NodeKind;

    /// Field holding the declared name of a class or function definition.
    fn name_field(&self) -> &'static str {
        "name"
    }

    /// Field holding the invoked expression of a call.
    fn callee_field(&self) -> &'static str {
        "function"
    }
}
