//! Route registration in tab-delimited routing files.
//!
//! New routes go directly above the catch-all static route so they take
//! priority over it while staying below every route declared earlier.
use crate::error::PackError;
use fd_lock::RwLock;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Leading fields of the catch-all route new routes are inserted above.
pub const DEFAULT_ROUTE_FIELDS: [&str; 4] = ["/", "static", "8080", "/"];

/// One route declaration: `prefix \t target \t port \t rewrite`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLine {
    pub prefix: String,
    pub target: String,
    pub port: u16,
    pub rewrite: String,
}

impl RouteLine {
    pub fn new(
        prefix: impl Into<String>,
        target: impl Into<String>,
        port: u16,
        rewrite: impl Into<String>,
    ) -> Result<Self, PackError> {
        let route = Self {
            prefix: prefix.into(),
            target: target.into(),
            port,
            rewrite: rewrite.into(),
        };
        for (label, value) in [
            ("prefix", &route.prefix),
            ("target", &route.target),
            ("rewrite", &route.rewrite),
        ] {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(PackError::InvalidRoute(format!(
                    "{label} must be non-empty and contain no whitespace (got {value:?})"
                )));
            }
        }
        Ok(route)
    }
}

impl fmt::Display for RouteLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.prefix, self.target, self.port, self.rewrite
        )
    }
}

/// What `add_route` did to the routing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Inserted above the default route found at this zero-based line.
    InsertedBeforeDefault { line: usize },
    Appended,
    /// An identical line already had the required priority; file unchanged.
    AlreadyPresent,
}

/// True when the line's first four whitespace-separated fields are `/ static 8080 /`.
pub fn is_default_route(line: impl AsRef<[u8]>) -> bool {
    let mut fields = line
        .as_ref()
        .split(u8::is_ascii_whitespace)
        .filter(|field| !field.is_empty());
    DEFAULT_ROUTE_FIELDS
        .iter()
        .all(|expected| fields.next() == Some(expected.as_bytes()))
}

/// Split on `\n`, dropping a trailing `\r` per line and the empty tail after a
/// final newline. Bytes are kept as-is so non-UTF-8 lines survive a rewrite.
fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = content
        .split(|byte| *byte == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect();
    if content.is_empty() || content.ends_with(b"\n") {
        lines.pop();
    }
    lines
}

/// Merge `new_line` into routing file `content`.
///
/// Returns the rewritten content, or `None` when the route is already present
/// with the required priority. Rewritten content always uses `\n` line endings
/// and ends with a newline.
pub fn merge_route(content: &[u8], new_line: &str) -> (Option<Vec<u8>>, RouteOutcome) {
    let new_line = new_line.trim_end_matches(['\r', '\n']).as_bytes();
    let lines = split_lines(content);
    let default_idx = lines.iter().position(|line| is_default_route(line));
    let searched = &lines[..default_idx.unwrap_or(lines.len())];
    if searched.iter().any(|line| *line == new_line) {
        return (None, RouteOutcome::AlreadyPresent);
    }

    let insert_at = default_idx.unwrap_or(lines.len());
    let mut merged = Vec::with_capacity(content.len() + new_line.len() + 2);
    for (pos, line) in lines.iter().enumerate() {
        if pos == insert_at {
            merged.extend_from_slice(new_line);
            merged.push(b'\n');
        }
        merged.extend_from_slice(line);
        merged.push(b'\n');
    }
    let outcome = match default_idx {
        Some(idx) => RouteOutcome::InsertedBeforeDefault { line: idx },
        None => {
            merged.extend_from_slice(new_line);
            merged.push(b'\n');
            RouteOutcome::Appended
        }
    };
    (Some(merged), outcome)
}

/// Add `new_line` to the routing file at `path`, rewriting it atomically.
///
/// Symlinks are resolved first so the file they point at is the one updated.
/// The read-modify-write cycle holds an advisory lock on a sibling
/// `.<name>.lock` file, created only once the routing file is known to exist.
/// On any write failure the routing file is left as it was.
pub fn add_route(path: &Path, new_line: &str) -> Result<RouteOutcome, PackError> {
    update_routes(path, new_line, write_replace)
}

fn update_routes<W>(path: &Path, new_line: &str, write: W) -> Result<RouteOutcome, PackError>
where
    W: FnOnce(&Path, &[u8]) -> io::Result<()>,
{
    let unreadable = |source: io::Error| PackError::RoutingFileUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let unwritable = |source: io::Error| PackError::RoutingFileUnwritable {
        path: path.to_path_buf(),
        source,
    };
    let target = fs::canonicalize(path).map_err(unreadable)?;
    if !fs::metadata(&target).map_err(unreadable)?.is_file() {
        return Err(unreadable(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path(&target))
        .map_err(unwritable)?;
    let mut lock = RwLock::new(lock_file);
    let _guard = lock.write().map_err(unwritable)?;

    let content = fs::read(&target).map_err(unreadable)?;
    let (merged, outcome) = merge_route(&content, new_line);
    if let Some(merged) = merged {
        write(&target, &merged).map_err(unwritable)?;
    }
    tracing::info!(
        path = %path.display(),
        target = %target.display(),
        outcome = ?outcome,
        "registered route"
    );
    Ok(outcome)
}

fn lock_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "routes".to_string());
    path.with_file_name(format!(".{name}.lock"))
}

/// Write to a temp file beside `path`, fsync it, then rename it over `path`.
fn write_replace(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
