//! Shared test infrastructure for CLI integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway packgen home with installed repositories and a work directory.
pub struct TestHome {
    pub dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp home"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Root of an installed repository under `<home>/packs`.
    pub fn repository(&self, name: &str) -> PathBuf {
        self.path().join("packs").join(name)
    }

    /// Add a file to pack `pack` in repository `repo`.
    pub fn add_pack_file(&self, repo: &str, pack: &str, rel: &str, contents: &str) {
        let path = self.repository(repo).join("packs").join(pack).join(rel);
        write_file(&path, contents);
    }

    /// Path for application directories and routing files.
    pub fn work(&self, rel: &str) -> PathBuf {
        self.path().join("work").join(rel)
    }

    /// Run the packgen binary with this home and no inherited repository list.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .env_remove("PACKGEN_REPOSITORIES")
            .output()
            .expect("run packgen")
    }

    /// Run the packgen binary against an explicit repository list.
    pub fn run_with_repositories(&self, repositories: &[&Path], args: &[&str]) -> Output {
        let list = std::env::join_paths(repositories).expect("join repository paths");
        self.command(args)
            .env("PACKGEN_REPOSITORIES", list)
            .output()
            .expect("run packgen")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_packgen"));
        command
            .args(args)
            .env("PACKGEN_HOME", self.path())
            .env_remove("RUST_LOG");
        command
    }
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents.as_bytes()).expect("write file");
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
