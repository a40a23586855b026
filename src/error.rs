//! Error kinds surfaced by pack resolution, materialization, and routing.
//!
//! None of these are retried or recovered locally; each maps to a distinct
//! message and exit code at the CLI boundary.
use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the scaffolding core.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("no languages were detected")]
    NoLanguageDetected,

    #[error("no packs found with name {0}")]
    PackNotFound(String),

    #[error("multiple packs named {name} found: {}", format_paths(.paths))]
    AmbiguousPack { name: String, paths: Vec<PathBuf> },

    #[error("there was an error reading {}: {source}", .path.display())]
    RepositoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read pack {}: {source}", .path.display())]
    PackUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("pack file path {0:?} must be relative and stay inside the pack")]
    InvalidPackPath(PathBuf),

    #[error("error creating {}: {source}", .path.display())]
    Materialize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("there was an error detecting the language in {}: {source}", .path.display())]
    Detection {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read routing file {}: {source}", .path.display())]
    RoutingFileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write routing file {}: {source}", .path.display())]
    RoutingFileUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("could not write progress output: {0}")]
    Output(#[source] io::Error),
}

/// Process exit codes, one per failure family.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const NO_LANGUAGE_DETECTED: i32 = 3;
    pub const PACK_NOT_FOUND: i32 = 4;
    pub const AMBIGUOUS_PACK: i32 = 5;
    pub const REPOSITORY_UNREADABLE: i32 = 6;
    pub const ROUTING_FILE: i32 = 7;
}

impl PackError {
    /// Exit code reported by the CLI when this error ends the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            PackError::NoLanguageDetected => exit_code::NO_LANGUAGE_DETECTED,
            PackError::PackNotFound(_) => exit_code::PACK_NOT_FOUND,
            PackError::AmbiguousPack { .. } => exit_code::AMBIGUOUS_PACK,
            PackError::RepositoryUnreadable { .. } => exit_code::REPOSITORY_UNREADABLE,
            PackError::RoutingFileUnreadable { .. } | PackError::RoutingFileUnwritable { .. } => {
                exit_code::ROUTING_FILE
            }
            PackError::InvalidRoute(_) | PackError::InvalidPackPath(_) => {
                exit_code::INVALID_INPUT
            }
            PackError::PackUnreadable { .. }
            | PackError::Materialize { .. }
            | PackError::Detection { .. }
            | PackError::Config { .. }
            | PackError::Output(_) => exit_code::FAILURE,
        }
    }
}

/// Exit code for an arbitrary error chain, keyed on the first `PackError` in it.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<PackError>())
        .map(PackError::exit_code)
        .unwrap_or(exit_code::FAILURE)
}

fn format_paths(paths: &[PathBuf]) -> String {
    let mut out = String::from("[");
    for (idx, path) in paths.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", path.display());
    }
    out.push(']');
    out
}
