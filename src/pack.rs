//! Starter packs and their materialization into a destination directory.
//!
//! A pack's files are defaults: materialization fills in whatever the
//! destination is missing and never overwrites a file that is already there.
use crate::error::PackError;
use crate::util::is_contained_relative;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A named bundle of scaffold files, keyed by destination-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pack {
    name: String,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl Pack {
    /// Build a pack from in-memory entries, rejecting paths that are absolute
    /// or that would escape the destination.
    pub fn from_files<I, P>(name: impl Into<String>, files: I) -> Result<Self, PackError>
    where
        I: IntoIterator<Item = (P, Vec<u8>)>,
        P: Into<PathBuf>,
    {
        let mut map = BTreeMap::new();
        for (rel_path, content) in files {
            let rel_path = rel_path.into();
            if !is_contained_relative(&rel_path) {
                return Err(PackError::InvalidPackPath(rel_path));
            }
            map.insert(rel_path, content);
        }
        Ok(Self {
            name: name.into(),
            files: map,
        })
    }

    /// Read every regular file under `dir` into memory. The pack takes the
    /// directory's base name.
    pub fn load(dir: &Path) -> Result<Self, PackError> {
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let unreadable = |source: io::Error| PackError::PackUnreadable {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for path in collect_files_recursive(dir).map_err(unreadable)? {
            let rel = path
                .strip_prefix(dir)
                .map(Path::to_path_buf)
                .map_err(|_| PackError::InvalidPackPath(path.clone()))?;
            let content = fs::read(&path).map_err(|source| PackError::PackUnreadable {
                path: path.clone(),
                source,
            })?;
            files.push((rel, content));
        }
        Self::from_files(name, files)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, Vec<u8>> {
        &self.files
    }
}

/// Copy every pack file into `dest`, skipping paths that already exist.
///
/// The first directory or file creation failure aborts the run; files written
/// before it stay on disk.
pub fn materialize(pack: &Pack, dest: &Path) -> Result<(), PackError> {
    for (rel_path, content) in &pack.files {
        let path = dest.join(rel_path);
        match fs::symlink_metadata(&path) {
            Ok(_) => {
                tracing::debug!(path = %path.display(), "keeping existing file");
                continue;
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(PackError::Materialize { path, source }),
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| PackError::Materialize {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        if !write_new_file(&path, content)? {
            tracing::debug!(path = %path.display(), "keeping file created concurrently");
            continue;
        }
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote pack file");
    }
    Ok(())
}

/// Write `content` to a file that must not exist yet. Returns `false` when
/// the file turned out to exist already.
fn write_new_file(path: &Path, content: &[u8]) -> Result<bool, PackError> {
    let materialize_err = |source: io::Error| PackError::Materialize {
        path: path.to_path_buf(),
        source,
    };
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(materialize_err(err)),
    };
    file.write_all(content).map_err(materialize_err)?;
    Ok(true)
}

/// List regular files beneath `root`, sorted by name within each directory.
///
/// Symlinks to files are listed; symlinked directories are not descended into.
pub fn collect_files_recursive(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let file_type = entry.file_type();
        if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
#[path = "pack_tests.rs"]
mod tests;
