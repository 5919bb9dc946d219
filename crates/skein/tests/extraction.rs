//! End-to-end extraction tests over files on disk.

use std::fs;
use std::path::PathBuf;

use rstest::rstest;
use skein::{Extractor, RelationshipKind, RelationshipRecord, RelationshipSet, SkeinConfig, extract_file};
use tempfile::TempDir;

/// Write `content` to `name` in a fresh temporary directory.
fn source_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("should write file");
    (dir, path)
}

fn extract_source(content: &str) -> RelationshipSet {
    let (_dir, path) = source_file("module.py", content);
    extract_file(&path, &SkeinConfig::default()).expect("extraction should succeed")
}

fn callees(records: &[RelationshipRecord]) -> Vec<&str> {
    records.iter().map(|r| r.callee.as_str()).collect()
}

const COMPLEX: &str = r"
import os
from sys import path

class DataProcessor:
    def __init__(self):
        self.data = []

    def process(self, item):
        self.data.append(item)

def main():
    processor = DataProcessor()
    helper()

def helper():
    pass
";

#[test]
fn complex_file_extracts_all_relationships() {
    let set = extract_source(COMPLEX);

    assert_eq!(set.module_import.len(), 1);
    assert_eq!(set.module_import_from.len(), 1);

    assert_eq!(callees(&set.class_definition), ["DataProcessor"]);

    let functions = callees(&set.function_definition);
    assert_eq!(functions, ["main", "helper"]);
    assert!(!functions.contains(&"__init__"));
    assert!(!functions.contains(&"process"));

    assert_eq!(callees(&set.method_definition), ["__init__", "process"]);

    assert_eq!(set.class_instantiation.len(), 1);
    assert_eq!(set.class_instantiation[0].callee, "DataProcessor");
    assert_eq!(set.class_instantiation[0].caller, "main");

    assert_eq!(set.function_call.len(), 1);
    assert_eq!(set.function_call[0].callee, "helper");
    assert_eq!(set.function_call[0].caller, "main");
}

#[test]
fn extracts_regular_imports_in_order() {
    let set = extract_source("import os\nimport sys\n");

    assert_eq!(callees(&set.module_import), ["import os", "import sys"]);
}

#[test]
fn extracts_from_imports() {
    let set = extract_source("from os import path\nfrom sys import argv\n");

    assert_eq!(
        callees(&set.module_import_from),
        ["from os import path", "from sys import argv"]
    );
}

#[test]
fn file_level_relationships_use_file_basename() {
    let (_dir, path) = source_file("caller_name.py", "import os\nclass A:\n    pass\n");
    let set = extract_file(&path, &SkeinConfig::default()).expect("should extract");

    assert_eq!(set.module_import[0].caller, "caller_name.py");
    assert_eq!(set.class_definition[0].caller, "caller_name.py");
}

#[test]
fn methods_carry_their_class_and_type() {
    let set = extract_source(
        "class MyClass:\n    def method_one(self):\n        pass\n\n    def method_two(self):\n        pass\n",
    );

    assert_eq!(callees(&set.method_definition), ["method_one", "method_two"]);
    for method in &set.method_definition {
        assert_eq!(method.caller, "MyClass");
        assert_eq!(method.kind, RelationshipKind::MethodDefinition);
    }
    assert!(set.function_definition.is_empty());
}

#[test]
fn calls_within_function_are_attributed() {
    let set = extract_source("def caller():\n    helper()\n    another_helper()\n");

    assert_eq!(callees(&set.function_call), ["helper", "another_helper"]);
    for call in &set.function_call {
        assert_eq!(call.caller, "caller");
        assert_eq!(call.kind, RelationshipKind::FunctionCall);
    }
}

#[test]
fn instantiation_and_call_are_disambiguated() {
    let set = extract_source("class Foo:\n    pass\n\ndef f():\n    Foo()\n    bar()\n");

    assert_eq!(set.class_instantiation.len(), 1);
    assert_eq!(set.class_instantiation[0].callee, "Foo");
    assert_eq!(set.class_instantiation[0].caller, "f");
    assert_eq!(set.function_call.len(), 1);
    assert_eq!(set.function_call[0].callee, "bar");
    assert_eq!(set.function_call[0].caller, "f");
}

#[test]
fn locations_are_zero_indexed_row_column_pairs() {
    let set = extract_source("import os\n");
    let value = serde_json::to_value(&set.module_import[0]).expect("serialize");

    assert_eq!(value["location"], serde_json::json!([[0, 0], [0, 9]]));
    assert_eq!(value["type"], "module_import");
}

#[rstest]
#[case::empty("")]
#[case::imports_only("import os\n")]
#[case::calls_only("print('hi')\n")]
#[case::malformed("def (:\n")]
fn every_category_is_always_serialized(#[case] content: &str) {
    let value = serde_json::to_value(extract_source(content)).expect("serialize");
    let object = value.as_object().expect("object");

    for kind in RelationshipKind::ALL {
        assert!(object.contains_key(kind.as_str()), "missing {kind}");
    }
}

#[test]
fn repeated_extraction_is_byte_identical() {
    let (_dir, path) = source_file("stable.py", COMPLEX);
    let mut extractor = Extractor::new();

    extractor.parse(&path).expect("first parse");
    let first = serde_json::to_string(&extractor.extract_relationships()).expect("serialize");
    extractor.parse(&path).expect("second parse");
    let second = serde_json::to_string(&extractor.extract_relationships()).expect("serialize");

    assert_eq!(first, second);
}

#[test]
fn configured_extension_is_parsed() {
    let (dir, path) = source_file("script.py3", "def run():\n    go()\n");
    fs::write(dir.path().join(skein::CONFIG_FILE_NAME), "language:\n  extensions:\n    py3: python\n")
        .expect("should write config");
    let config = SkeinConfig::discover(None, dir.path()).expect("should load config");

    let mut extractor = Extractor::with_config(config);
    extractor.parse(&path).expect("should parse");

    assert_eq!(callees(&extractor.extract_relationships().function_call), ["go"]);
}

#[test]
fn extractors_are_independent() {
    let (_d1, classes) = source_file("a.py", "class Foo:\n    pass\n");
    let (_d2, calls) = source_file("b.py", "Foo()\n");

    let mut first = Extractor::new();
    let mut second = Extractor::new();
    first.parse(&classes).expect("parse a");
    second.parse(&calls).expect("parse b");

    assert_eq!(first.extract_relationships().class_definition.len(), 1);
    let set = second.extract_relationships();
    assert!(set.class_instantiation.is_empty());
    assert_eq!(set.function_call[0].caller, "b.py");
}
