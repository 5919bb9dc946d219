//! # Skein: Single-File Structural Relationship Extraction
//!
//! Skein parses one source file with tree-sitter and derives a flat,
//! categorized set of structural relationships: imports, class definitions,
//! function and method definitions, call sites, and class instantiations.
//! The output feeds indexing, dependency graphs, or retrieval pipelines.
//!
//! ## Design Philosophy
//!
//! - **Syntax, not semantics** - no type resolution, no cross-file linking
//! - **Best effort** - malformed regions contribute nothing instead of failing
//! - **No global state** - every parse owns its tree; nothing carries over
//!   between files
//!
//! ## Quick Start
//!
//! ```no_run
//! use skein::{Extractor, RelationshipKind};
//! use std::path::Path;
//!
//! let mut extractor = Extractor::new();
//! extractor.parse(Path::new("app/main.py"))?;
//!
//! let relationships = extractor.extract_relationships();
//! for call in relationships.get(RelationshipKind::FunctionCall) {
//!     println!("{} calls {}", call.caller, call.callee);
//! }
//! # Ok::<(), skein::Error>(())
//! ```

mod config;
mod error;
mod extract;
mod languages;
pub mod router;
mod scope;
mod tree;
mod types;
mod walker;

pub use config::{CONFIG_FILE_NAME, LanguageConfig, OutputConfig, SkeinConfig};
pub use error::{Error, Result};
pub use extract::extract;
pub use languages::{LanguageSupport, get_language_support};
pub use scope::{
    Enclosure, ScopeKind, enclosing, enclosing_function, enclosing_kind, is_directly_inside_class,
};
pub use tree::{Node, NodeId, NodeKind, SyntaxTree};
pub use types::{
    Language, Location, Position, RelationshipKind, RelationshipRecord, RelationshipSet,
};
pub use walker::{Preorder, ancestors, parent_of, traverse};

use std::path::Path;

/// Stateful extractor over one file at a time.
///
/// Holds the tree of the most recently parsed file. Each [`Extractor::parse`]
/// replaces that tree wholesale; a failed parse clears it.
#[derive(Debug, Default)]
pub struct Extractor {
    config: SkeinConfig,
    tree: Option<SyntaxTree>,
}

impl Extractor {
    /// Create an extractor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with explicit configuration.
    #[must_use]
    pub fn with_config(config: SkeinConfig) -> Self {
        Self { config, tree: None }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &SkeinConfig {
        &self.config
    }

    /// Parse `path`, replacing the current tree.
    ///
    /// Succeeds for any readable file, including syntactically invalid ones.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileAccess` if the file cannot be read. The current
    /// tree is cleared in that case.
    pub fn parse(&mut self, path: &Path) -> Result<&SyntaxTree> {
        self.tree = None;
        let language = self.config.language_for(path);
        let tree = SyntaxTree::parse_file(path, language)?;
        Ok(&*self.tree.insert(tree))
    }

    /// Tree of the most recently parsed file, if the last parse succeeded.
    #[must_use]
    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.tree.as_ref()
    }

    /// Basename of the most recently parsed file.
    #[must_use]
    pub fn current_file_name(&self) -> Option<&str> {
        self.tree.as_ref().map(SyntaxTree::file_name)
    }

    /// Extract relationships from the current tree.
    ///
    /// Without a current tree every category is empty.
    #[must_use]
    pub fn extract_relationships(&self) -> RelationshipSet {
        self.tree.as_ref().map(extract).unwrap_or_default()
    }
}

/// Parse and extract one file in a single call.
///
/// # Errors
///
/// Returns `Error::FileAccess` if the file cannot be read.
pub fn extract_file(path: &Path, config: &SkeinConfig) -> Result<RelationshipSet> {
    let tree = SyntaxTree::parse_file(path, config.language_for(path))?;
    Ok(extract(&tree))
}
