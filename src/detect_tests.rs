use super::{ExtensionDetector, LanguageAliases, LanguageDetector};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_bytes(path: &Path, len: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, vec![b'x'; len]).expect("write file");
}

#[test]
fn ranks_languages_by_byte_share() {
    let src = TempDir::new().expect("temp dir");
    write_bytes(&src.path().join("app.py"), 600);
    write_bytes(&src.path().join("lib/util.py"), 200);
    write_bytes(&src.path().join("tools/main.go"), 200);
    write_bytes(&src.path().join("README.md"), 5000);

    let guesses = ExtensionDetector.detect(src.path()).expect("detect");

    let names: Vec<_> = guesses.iter().map(|g| g.language.as_str()).collect();
    assert_eq!(names, ["Python", "Go"]);
    assert!((guesses[0].percent - 80.0).abs() < 1e-9);
    assert!((guesses[1].percent - 20.0).abs() < 1e-9);
}

#[test]
fn skips_hidden_and_vendored_directories() {
    let src = TempDir::new().expect("temp dir");
    write_bytes(&src.path().join("index.js"), 10);
    write_bytes(&src.path().join("node_modules/dep/index.ts"), 10_000);
    write_bytes(&src.path().join(".git/hooks/pre-commit.py"), 10_000);

    let guesses = ExtensionDetector.detect(src.path()).expect("detect");

    assert_eq!(guesses.len(), 1);
    assert_eq!(guesses[0].language, "JavaScript");
    assert!((guesses[0].percent - 100.0).abs() < 1e-9);
}

#[test]
fn equal_shares_are_ordered_by_name() {
    let src = TempDir::new().expect("temp dir");
    write_bytes(&src.path().join("a.rb"), 50);
    write_bytes(&src.path().join("b.go"), 50);

    let guesses = ExtensionDetector.detect(src.path()).expect("detect");

    let names: Vec<_> = guesses.iter().map(|g| g.language.as_str()).collect();
    assert_eq!(names, ["Go", "Ruby"]);
}

#[test]
fn unrecognized_tree_yields_no_guesses() {
    let src = TempDir::new().expect("temp dir");
    write_bytes(&src.path().join("notes.txt"), 100);

    assert!(ExtensionDetector.detect(src.path()).expect("detect").is_empty());
}

#[test]
fn missing_directory_is_a_detection_error() {
    let src = TempDir::new().expect("temp dir");
    let err = ExtensionDetector
        .detect(&src.path().join("missing"))
        .expect_err("missing dir");
    assert!(matches!(err, crate::error::PackError::Detection { .. }));
}

#[test]
fn aliases_are_case_insensitive_with_identity_default() {
    let mut aliases = LanguageAliases::default();
    assert_eq!(aliases.canonical("JavaScript"), "nodejs");
    assert_eq!(aliases.canonical("javascript"), "nodejs");
    assert_eq!(aliases.canonical("C#"), "csharp");
    assert_eq!(aliases.canonical("Python"), "Python");

    aliases.extend([("Python".to_string(), "python3".to_string())]);
    assert_eq!(aliases.canonical("PYTHON"), "python3");

    assert_eq!(LanguageAliases::empty().canonical("JavaScript"), "JavaScript");
}
