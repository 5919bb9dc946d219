//! Shared tree-sitter utilities for the parser adapter.
//!
//! Converts tree-sitter positions into Skein's position types.

// Tree-sitter returns usize for positions, but we store u32 for compactness.
// This is safe for practical source files (no file has 4 billion lines).
#![allow(clippy::cast_possible_truncation)]

use crate::types::{Location, Position};

/// Convert a tree-sitter point to a `Position`. Both are 0-indexed.
pub fn point_position(point: tree_sitter::Point) -> Position {
    Position::new(point.row as u32, point.column as u32)
}

/// Convert a tree-sitter node's start and end points to a `Location`.
///
/// Falls back to an empty location at the start point if the node reports an
/// end before its start.
pub fn node_location(node: &tree_sitter::Node) -> Location {
    let start = point_position(node.start_position());
    let end = point_position(node.end_position());

    Location::new(start, end).unwrap_or_else(|| {
        tracing::warn!(
            start_row = start.row,
            start_column = start.column,
            end_row = end.row,
            end_column = end.column,
            node_kind = %node.kind(),
            "Tree-sitter produced invalid span, using fallback"
        );
        Location(start, start)
    })
}
