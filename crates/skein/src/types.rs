//! Domain types for Skein relationship extraction.
//!
//! These types represent the output model:
//! - **Positions**: `Position`, `Location` (zero-indexed row/column spans)
//! - **Records**: `RelationshipKind`, `RelationshipRecord`
//! - **Results**: `RelationshipSet` (all categories for one file)
//!
//! ## Wire Shape
//!
//! | Type | JSON |
//! |------|------|
//! | `Position` | `[row, column]` |
//! | `Location` | `[[row, column], [row, column]]` |
//! | `RelationshipRecord` | `{"caller", "callee", "type", "location"}` |
//! | `RelationshipSet` | one key per category, always present |

use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// Supported source languages.
///
/// Adding a new language requires implementing the `LanguageSupport` trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Python source files (`.py`, `.pyi`, `.pyw`)
    #[default]
    Python,
}

impl Language {
    /// File extensions handled by this language.
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Python => &["py", "pyi", "pyw"],
        }
    }

    /// Detect language from file extension.
    ///
    /// # Returns
    ///
    /// `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        [Self::Python]
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
        }
    }
}

/// Category of an extracted relationship.
///
/// The serialized name doubles as the category key in a `RelationshipSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// `import x` (whole-module form)
    ModuleImport,
    /// `from x import y` (selective form)
    ModuleImportFrom,
    /// Class declared anywhere in the file
    ClassDefinition,
    /// Function whose nearest enclosure is not a class
    FunctionDefinition,
    /// Function declared directly in a class body
    MethodDefinition,
    /// Call of a name that is not a known class
    FunctionCall,
    /// Call of a name declared as a class in the same file
    ClassInstantiation,
}

impl RelationshipKind {
    /// Every category, in serialization order.
    pub const ALL: [Self; 7] = [
        Self::ModuleImport,
        Self::ModuleImportFrom,
        Self::ClassDefinition,
        Self::FunctionDefinition,
        Self::MethodDefinition,
        Self::FunctionCall,
        Self::ClassInstantiation,
    ];

    /// Category name as used on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModuleImport => "module_import",
            Self::ModuleImportFrom => "module_import_from",
            Self::ClassDefinition => "class_definition",
            Self::FunctionDefinition => "function_definition",
            Self::MethodDefinition => "method_definition",
            Self::FunctionCall => "function_call",
            Self::ClassInstantiation => "class_instantiation",
        }
    }

    /// Parse a wire category name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Positions
// ============================================================================

/// A zero-indexed (row, column) position in a source file.
///
/// Serialized as a two-element array `[row, column]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Position {
    /// Row (0-indexed)
    pub row: u32,
    /// Column in bytes (0-indexed)
    pub column: u32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl From<[u32; 2]> for Position {
    fn from([row, column]: [u32; 2]) -> Self {
        Self { row, column }
    }
}

impl From<Position> for [u32; 2] {
    fn from(pos: Position) -> Self {
        [pos.row, pos.column]
    }
}

/// Start and end positions of a node. The end is exclusive.
///
/// Serialized as `[[row, column], [row, column]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location(pub Position, pub Position);

impl Location {
    /// Create a location, returning `None` if `end` precedes `start`.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Option<Self> {
        (end >= start).then_some(Self(start, end))
    }

    /// Start position (inclusive).
    #[must_use]
    pub fn start(&self) -> Position {
        self.0
    }

    /// End position (exclusive).
    #[must_use]
    pub fn end(&self) -> Position {
        self.1
    }

    /// Whether `other` lies entirely within this location.
    #[must_use]
    pub fn contains(&self, other: &Location) -> bool {
        self.0 <= other.0 && other.1 <= self.1
    }
}

// ============================================================================
// Relationship records
// ============================================================================

/// One structural fact extracted from a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipRecord {
    /// Enclosing entity: file basename, class name, or function name
    pub caller: String,
    /// Referenced entity: import text, declared name, or invoked name
    pub callee: String,
    /// Category of the relationship
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    /// Span of the node the record was derived from
    pub location: Location,
}

impl RelationshipRecord {
    /// Create a record.
    #[must_use]
    pub fn new(
        kind: RelationshipKind,
        caller: impl Into<String>,
        callee: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            caller: caller.into(),
            callee: callee.into(),
            kind,
            location,
        }
    }
}

/// All relationships extracted from one file, grouped by category.
///
/// Every category is always present (possibly empty). Within a category,
/// records appear in source order and are never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipSet {
    /// `import x` statements
    pub module_import: Vec<RelationshipRecord>,
    /// `from x import y` statements
    pub module_import_from: Vec<RelationshipRecord>,
    /// Class declarations
    pub class_definition: Vec<RelationshipRecord>,
    /// Plain function declarations
    pub function_definition: Vec<RelationshipRecord>,
    /// Method declarations
    pub method_definition: Vec<RelationshipRecord>,
    /// Calls of non-class names
    pub function_call: Vec<RelationshipRecord>,
    /// Calls of known class names
    pub class_instantiation: Vec<RelationshipRecord>,
}

impl RelationshipSet {
    /// Records of one category, in source order.
    #[must_use]
    pub fn get(&self, kind: RelationshipKind) -> &[RelationshipRecord] {
        match kind {
            RelationshipKind::ModuleImport => &self.module_import,
            RelationshipKind::ModuleImportFrom => &self.module_import_from,
            RelationshipKind::ClassDefinition => &self.class_definition,
            RelationshipKind::FunctionDefinition => &self.function_definition,
            RelationshipKind::MethodDefinition => &self.method_definition,
            RelationshipKind::FunctionCall => &self.function_call,
            RelationshipKind::ClassInstantiation => &self.class_instantiation,
        }
    }

    fn get_mut(&mut self, kind: RelationshipKind) -> &mut Vec<RelationshipRecord> {
        match kind {
            RelationshipKind::ModuleImport => &mut self.module_import,
            RelationshipKind::ModuleImportFrom => &mut self.module_import_from,
            RelationshipKind::ClassDefinition => &mut self.class_definition,
            RelationshipKind::FunctionDefinition => &mut self.function_definition,
            RelationshipKind::MethodDefinition => &mut self.method_definition,
            RelationshipKind::FunctionCall => &mut self.function_call,
            RelationshipKind::ClassInstantiation => &mut self.class_instantiation,
        }
    }

    /// Append a record to the category named by its `kind`.
    pub fn push(&mut self, record: RelationshipRecord) {
        self.get_mut(record.kind).push(record);
    }

    /// Total number of records across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        RelationshipKind::ALL.iter().map(|k| self.get(*k).len()).sum()
    }

    /// Whether every category is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records, category by category, each category in source order.
    pub fn iter(&self) -> impl Iterator<Item = &RelationshipRecord> {
        RelationshipKind::ALL
            .into_iter()
            .flat_map(move |kind| self.get(kind).iter())
    }

    /// Record count per category, in serialization order.
    #[must_use]
    pub fn counts(&self) -> [(RelationshipKind, usize); 7] {
        RelationshipKind::ALL.map(|kind| (kind, self.get(kind).len()))
    }
}
