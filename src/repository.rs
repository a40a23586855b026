//! Pack repositories and the name index built over them.
//!
//! Directory listing happens once, when the index is built; name matching is a
//! pure lookup over the in-memory index.
use crate::error::PackError;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Folder inside a repository that holds the named packs.
pub const PACK_DIR_NAME: &str = "packs";

/// A directory containing a `packs/` folder of named starter packs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the `packs/` directory path.
    pub fn packs_dir(&self) -> PathBuf {
        self.root.join(PACK_DIR_NAME)
    }

    /// List the pack directories directly under `packs/`, sorted by name.
    pub fn list_packs(&self) -> Result<Vec<PathBuf>, PackError> {
        let packs_dir = self.packs_dir();
        let unreadable = |source: io::Error| PackError::RepositoryUnreadable {
            path: packs_dir.clone(),
            source,
        };
        let mut packs = Vec::new();
        for entry in fs::read_dir(&packs_dir).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            if entry.path().is_dir() {
                packs.push(entry.path());
            }
        }
        packs.sort();
        Ok(packs)
    }
}

/// Find every repository below `packs_home`, in path order.
///
/// A directory holding a `packs/` folder is a repository; its contents are not
/// searched for nested repositories. A missing `packs_home` has none.
pub fn discover_repositories(packs_home: &Path) -> Vec<Repository> {
    let mut repositories = Vec::new();
    let mut walker = WalkDir::new(packs_home)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry under packs home");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.path().join(PACK_DIR_NAME).is_dir() {
            repositories.push(Repository::new(entry.path()));
            walker.skip_current_dir();
        }
    }
    repositories
}

/// Lowercased pack name mapped to every pack directory carrying that name, in
/// repository order.
#[derive(Debug, Clone, Default)]
pub struct PackIndex {
    by_name: BTreeMap<String, Vec<PathBuf>>,
}

impl PackIndex {
    /// List every repository in order and index its packs.
    ///
    /// Any repository whose `packs/` folder cannot be listed fails the build.
    pub fn build(repositories: &[Repository]) -> Result<Self, PackError> {
        let mut entries = Vec::new();
        for repository in repositories {
            for pack_dir in repository.list_packs()? {
                let Some(name) = pack_dir.file_name() else {
                    continue;
                };
                entries.push((name.to_string_lossy().into_owned(), pack_dir.clone()));
            }
            tracing::debug!(repository = %repository.root().display(), "indexed repository");
        }
        Ok(Self::from_entries(entries))
    }

    /// Index `(pack name, pack path)` pairs without touching the filesystem.
    pub fn from_entries<I, S, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, P)>,
        S: AsRef<str>,
        P: Into<PathBuf>,
    {
        let mut by_name: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for (name, path) in entries {
            by_name
                .entry(name.as_ref().to_lowercase())
                .or_default()
                .push(path.into());
        }
        Self { by_name }
    }

    /// Every pack whose name equals `name`, ignoring case.
    pub fn find(&self, name: &str) -> &[PathBuf] {
        self.by_name
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All indexed pack paths, grouped by lowercased name.
    pub fn packs(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.by_name.iter().flat_map(|(name, paths)| {
            paths.iter().map(move |path| (name.as_str(), path.as_path()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
