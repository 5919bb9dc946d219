//! Error path integration tests for Skein extraction.
//!
//! Tests that the extractor handles missing, empty, malformed, and
//! non-UTF-8 files without panicking.

use std::fs;
use std::path::PathBuf;

use skein::{Error, Extractor, RelationshipKind};
use tempfile::TempDir;

/// Create a temporary directory holding one source file.
fn file_with_content(name: &str, content: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("should write file");
    (dir, path)
}

// === File access errors ===

#[test]
fn nonexistent_file_is_file_access_error() {
    let mut extractor = Extractor::new();

    let err = extractor
        .parse(&PathBuf::from("/nonexistent/path/file.py"))
        .expect_err("missing file should fail");

    assert!(matches!(err, Error::FileAccess { .. }));
    assert!(extractor.tree().is_none(), "no partial tree is produced");
}

#[test]
fn directory_is_file_access_error() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let mut extractor = Extractor::new();

    let err = extractor
        .parse(dir.path())
        .expect_err("directory should fail");

    assert!(err.is_file_access());
}

#[cfg(unix)]
#[test]
fn unreadable_file_is_file_access_error() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = file_with_content("secret.py", b"import os\n");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).expect("should chmod");

    // Root ignores permission bits; nothing to assert in that case
    if fs::read(&path).is_ok() {
        return;
    }

    let err = Extractor::new()
        .parse(&path)
        .expect_err("unreadable file should fail");
    assert!(err.is_file_access());
}

// === Empty file tests ===

#[test]
fn empty_file_has_every_category_empty() {
    let (_dir, path) = file_with_content("empty.py", b"");
    let mut extractor = Extractor::new();
    extractor.parse(&path).expect("empty file should parse");

    let set = extractor.extract_relationships();

    for kind in RelationshipKind::ALL {
        assert!(set.get(kind).is_empty(), "{kind} should be empty");
    }
}

#[test]
fn whitespace_and_comments_only_file_is_empty() {
    let (_dir, path) = file_with_content("blank.py", b"   \n\n# just a comment\n\t\n");
    let mut extractor = Extractor::new();
    extractor.parse(&path).expect("should parse");

    assert!(extractor.extract_relationships().is_empty());
}

// === Malformed source tests ===

#[test]
fn file_with_syntax_errors_does_not_panic() {
    let malformed = b"
def incomplete(
    # missing closing paren and body
class Orphan:
    field = !!!invalid
";
    let (_dir, path) = file_with_content("bad.py", malformed);
    let mut extractor = Extractor::new();

    let tree = extractor
        .parse(&path)
        .expect("parse should succeed even with malformed files");
    assert!(tree.has_errors());

    let set = extractor.extract_relationships();
    for record in set.iter() {
        assert!(!record.caller.is_empty());
        assert!(!record.callee.is_empty());
    }
}

#[test]
fn truncated_file_keeps_earlier_relationships() {
    let truncated = b"import os

def complete():
    helper()

def process(data):
    results = []
    for item in data:
        if item > 0:
            results.append(format(";
    let (_dir, path) = file_with_content("truncated.py", truncated);
    let mut extractor = Extractor::new();
    extractor.parse(&path).expect("parse should succeed");

    let set = extractor.extract_relationships();

    // Everything before the truncation point survives error recovery
    assert_eq!(set.module_import.len(), 1);
    assert!(set.function_definition.iter().any(|r| r.callee == "complete"));
    assert!(
        set.function_call
            .iter()
            .any(|r| r.callee == "helper" && r.caller == "complete")
    );
}

#[test]
fn non_python_garbage_does_not_panic() {
    let (_dir, path) = file_with_content("noise.py", b"}}}{{{ @#$% ;;; fn main() { let x = 1; }");
    let mut extractor = Extractor::new();
    let tree = extractor.parse(&path).expect("parse should succeed");
    assert!(tree.has_errors());

    let set = extractor.extract_relationships();
    for record in set.iter() {
        assert!(!record.caller.is_empty());
        assert!(!record.callee.is_empty());
        assert!(record.location.start() <= record.location.end());
    }
}

// === Non-UTF-8 content tests ===

#[test]
fn non_utf8_file_is_parsed_lossily() {
    let mut content = b"import os\n# ".to_vec();
    content.extend_from_slice(&[0xFF, 0xFE, 0x80, 0x81]);
    content.extend_from_slice(b"\ndef after():\n    pass\n");
    let (_dir, path) = file_with_content("binary.py", &content);

    let mut extractor = Extractor::new();
    extractor.parse(&path).expect("invalid bytes are not a file access error");
    let set = extractor.extract_relationships();

    assert_eq!(set.module_import[0].callee, "import os");
    assert_eq!(set.function_definition[0].callee, "after");
}
