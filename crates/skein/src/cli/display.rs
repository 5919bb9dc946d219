//! Common display utilities for CLI commands.

use colored::Colorize;
use skein::{RelationshipKind, RelationshipRecord, RelationshipSet};

const MAX_DISPLAY_ITEMS: usize = 20;

/// Human-readable heading for a category.
fn heading(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::ModuleImport => "Imports",
        RelationshipKind::ModuleImportFrom => "From-imports",
        RelationshipKind::ClassDefinition => "Classes",
        RelationshipKind::FunctionDefinition => "Functions",
        RelationshipKind::MethodDefinition => "Methods",
        RelationshipKind::FunctionCall => "Calls",
        RelationshipKind::ClassInstantiation => "Instantiations",
    }
}

/// One record as `row:col  caller -> callee` (rows shown 1-indexed).
fn format_record(record: &RelationshipRecord) -> String {
    let start = record.location.start();
    // Imports span lines; show only the first
    let callee = record.callee.lines().next().unwrap_or_default();
    format!(
        "{:>5}:{:<3} {} {} {}",
        start.row + 1,
        start.column,
        record.caller.dimmed(),
        "->".dimmed(),
        callee.white().bold()
    )
}

/// Print every category with its records, truncating long categories.
///
/// Empty categories are listed with a count of zero so the output always
/// shows the full shape.
pub fn print_relationships(file: &str, set: &RelationshipSet) {
    println!(
        "{} {} ({} relationships)",
        "File".cyan().bold(),
        file,
        set.len().to_string().green().bold()
    );

    for (kind, count) in set.counts() {
        println!();
        println!(
            "  {} {}",
            heading(kind).bold(),
            format!("[{kind}: {count}]").dimmed()
        );

        let records = set.get(kind);
        for record in records.iter().take(MAX_DISPLAY_ITEMS) {
            println!("  {} {}", "•".dimmed(), format_record(record));
        }
        if records.len() > MAX_DISPLAY_ITEMS {
            println!(
                "  {} ... and {} more",
                "•".dimmed(),
                records.len() - MAX_DISPLAY_ITEMS
            );
        }
    }
}
