use super::{discover_repositories, PackIndex, Repository};
use crate::error::PackError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn make_pack(repo_root: &Path, name: &str) -> PathBuf {
    let dir = repo_root.join("packs").join(name);
    fs::create_dir_all(&dir).expect("create pack dir");
    fs::write(dir.join("Dockerfile"), b"FROM scratch\n").expect("write Dockerfile");
    dir
}

#[test]
fn find_matches_case_insensitively_and_exactly() {
    let index = PackIndex::from_entries([
        ("Go", "/r1/packs/Go"),
        ("golang-extra", "/r1/packs/golang-extra"),
        ("python", "/r1/packs/python"),
    ]);

    assert_eq!(index.find("go"), [PathBuf::from("/r1/packs/Go")]);
    assert_eq!(index.find("GO"), [PathBuf::from("/r1/packs/Go")]);
    assert!(index.find("gol").is_empty());
    assert!(index.find("rust").is_empty());
}

#[test]
fn find_aggregates_across_repositories_in_order() {
    let index = PackIndex::from_entries([
        ("java", "/r1/packs/java"),
        ("JAVA", "/r2/packs/JAVA"),
    ]);

    assert_eq!(
        index.find("Java"),
        [PathBuf::from("/r1/packs/java"), PathBuf::from("/r2/packs/JAVA")]
    );
}

#[test]
fn build_indexes_pack_directories_and_ignores_files() {
    let repo = TempDir::new().expect("temp dir");
    let go = make_pack(repo.path(), "go");
    fs::write(repo.path().join("packs/README.md"), b"not a pack").expect("write readme");

    let index = PackIndex::build(&[Repository::new(repo.path())]).expect("build index");

    assert_eq!(index.find("go"), [go]);
    assert!(index.find("readme.md").is_empty());
}

#[test]
fn build_with_empty_packs_dir_finds_nothing() {
    let repo = TempDir::new().expect("temp dir");
    fs::create_dir_all(repo.path().join("packs")).expect("create packs dir");

    let index = PackIndex::build(&[Repository::new(repo.path())]).expect("build index");

    assert!(index.is_empty());
    assert!(index.find("go").is_empty());
}

#[test]
fn build_fails_when_packs_dir_is_missing() {
    let good = TempDir::new().expect("temp dir");
    make_pack(good.path(), "go");
    let missing = TempDir::new().expect("temp dir");

    let err = PackIndex::build(&[Repository::new(good.path()), Repository::new(missing.path())])
        .expect_err("missing packs dir");

    match err {
        PackError::RepositoryUnreadable { path, .. } => {
            assert_eq!(path, missing.path().join("packs"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn build_fails_when_packs_is_a_file() {
    let repo = TempDir::new().expect("temp dir");
    fs::write(repo.path().join("packs"), b"oops").expect("write file");

    let err = PackIndex::build(&[Repository::new(repo.path())]).expect_err("not a dir");

    assert!(matches!(err, PackError::RepositoryUnreadable { .. }));
}

#[test]
fn discover_finds_nested_repositories_in_path_order() {
    let home = TempDir::new().expect("temp dir");
    let zeta = home.path().join("zeta");
    let alpha = home.path().join("github.com/acme/alpha");
    make_pack(&zeta, "go");
    make_pack(&alpha, "python");
    fs::create_dir_all(home.path().join("empty-dir")).expect("create dir");

    let repositories = discover_repositories(home.path());

    assert_eq!(
        repositories,
        vec![Repository::new(&alpha), Repository::new(&zeta)]
    );
}

#[test]
fn discover_does_not_treat_pack_folders_as_repositories() {
    let home = TempDir::new().expect("temp dir");
    let repo = home.path().join("main");
    let pack = make_pack(&repo, "go");
    // A pack that itself carries a `packs/` folder must not become a repository.
    fs::create_dir_all(pack.join("packs")).expect("create nested packs dir");

    let repositories = discover_repositories(home.path());

    assert_eq!(repositories, vec![Repository::new(&repo)]);
}

#[test]
fn discover_on_missing_home_returns_nothing() {
    let home = TempDir::new().expect("temp dir");
    assert!(discover_repositories(&home.path().join("nope")).is_empty());
}
